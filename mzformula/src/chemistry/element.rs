use std::{borrow::Borrow, sync::Arc};

use serde::{Deserialize, Serialize};

/// The halogens, these count as monovalent atoms in the unsaturation calculation
pub const HALOGENS: [&str; 4] = ["F", "Cl", "Br", "I"];

/// The maximal valency for the elements known to the valence check
pub const VALENCIES: [(&str, u32); 9] = [
    ("C", 4),
    ("H", 1),
    ("N", 3),
    ("O", 2),
    ("S", 2),
    ("F", 1),
    ("Cl", 7),
    ("Br", 7),
    ("I", 7),
];

/// An element symbol, for example `C` or `Br`. This is an opaque key, the only validation it
/// receives is whether it is present in the mass table used for a search.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ElementSymbol(Arc<str>);

impl ElementSymbol {
    /// Create a new element symbol
    pub fn new(symbol: impl Into<Arc<str>>) -> Self {
        Self(symbol.into())
    }

    /// Get the symbol as text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is one of the [`HALOGENS`]
    pub fn is_halogen(&self) -> bool {
        HALOGENS.contains(&self.as_str())
    }

    /// The maximal valency, if this element is present in [`VALENCIES`]
    pub fn valency(&self) -> Option<u32> {
        VALENCIES
            .iter()
            .find(|(symbol, _)| *symbol == self.as_str())
            .map(|(_, valency)| *valency)
    }
}

impl From<&str> for ElementSymbol {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ElementSymbol {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl Borrow<str> for ElementSymbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ElementSymbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
