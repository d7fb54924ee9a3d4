use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The mass of a proton in Dalton, as used for the default ionization modes
pub const PROTON_MASS: f64 = 1.007276;

/// Named ionization modes with the mass (in Dalton) they add to the neutral molecule.
///
/// The [`Default`] table contains the neutral case (`+`), one to three protonations, and one or
/// two deprotonations.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IonizationTable {
    modes: IndexMap<String, f64>,
}

impl Default for IonizationTable {
    fn default() -> Self {
        Self::empty()
            .with("+", 0.0)
            .with("H+", PROTON_MASS)
            .with("(H+)*2", 2.0 * PROTON_MASS)
            .with("(H+)*3", 3.0 * PROTON_MASS)
            .with("-", -PROTON_MASS)
            .with("(-)*2", 2.0 * -PROTON_MASS)
    }
}

impl IonizationTable {
    /// A table without any ionization modes
    pub fn empty() -> Self {
        Self {
            modes: IndexMap::new(),
        }
    }

    /// Add (or replace) an ionization mode
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, adjustment: f64) -> Self {
        self.modes.insert(name.into(), adjustment);
        self
    }

    /// Get the mass adjustment for the named mode
    pub fn get(&self, name: &str) -> Option<f64> {
        self.modes.get(name).copied()
    }

    /// Iterate over all modes in definition order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, f64)> + '_ {
        self.modes.iter().map(|(name, mass)| (name.as_str(), *mass))
    }

    /// The number of modes
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    /// Check if there are no modes
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}
