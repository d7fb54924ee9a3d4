use std::ops::RangeInclusive;

use context_error::{BoxedError, Context, CreateError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{chemistry::ElementSymbol, error::FormulaError};

/// The allowed number of atoms for one element, both ends inclusive.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(from = "(u32, u32)", into = "(u32, u32)")]
pub struct AtomRange {
    /// The minimal number of atoms
    pub min: u32,
    /// The maximal number of atoms (inclusive)
    pub max: u32,
}

impl AtomRange {
    /// Create a new range, this is not validated, see [`AtomRanges::validate`]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// A range that only allows exactly zero atoms
    pub const NONE: Self = Self::new(0, 0);

    /// Check that `min <= max`
    pub const fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    /// The number of distinct counts in this range, zero for an invalid range
    pub const fn len(&self) -> u64 {
        if self.is_valid() {
            self.max as u64 - self.min as u64 + 1
        } else {
            0
        }
    }

    /// All counts in this range
    pub const fn counts(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }
}

impl From<(u32, u32)> for AtomRange {
    fn from(value: (u32, u32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<AtomRange> for (u32, u32) {
    fn from(value: AtomRange) -> Self {
        (value.min, value.max)
    }
}

impl From<RangeInclusive<u32>> for AtomRange {
    fn from(value: RangeInclusive<u32>) -> Self {
        Self::new(*value.start(), *value.end())
    }
}

/// The atom ranges for all elements that span the search space.
///
/// The order of the elements is significant: it is the order in which the search space is
/// traversed, and so the order of candidates with identical deviations, and the order in which
/// elements are displayed in the resulting formulas.
///
/// The [`Default`] ranges are C 0–50, H 0–100, N 0–20, O 0–30, S 0–5, and none of the halogens.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AtomRanges {
    ranges: IndexMap<ElementSymbol, AtomRange>,
}

impl Default for AtomRanges {
    fn default() -> Self {
        Self::empty()
            .with("C", 0, 50)
            .with("H", 0, 100)
            .with("N", 0, 20)
            .with("O", 0, 30)
            .with("S", 0, 5)
            .with("F", 0, 0)
            .with("Br", 0, 0)
            .with("Cl", 0, 0)
            .with("I", 0, 0)
    }
}

impl AtomRanges {
    /// No elements at all
    pub fn empty() -> Self {
        Self {
            ranges: IndexMap::new(),
        }
    }

    /// Add (or replace) the range for an element, a new element is placed last
    #[must_use]
    pub fn with(mut self, symbol: impl Into<ElementSymbol>, min: u32, max: u32) -> Self {
        self.insert(symbol, AtomRange::new(min, max));
        self
    }

    /// Add (or replace) the range for an element, returning the old range if there was one
    pub fn insert(
        &mut self,
        symbol: impl Into<ElementSymbol>,
        range: impl Into<AtomRange>,
    ) -> Option<AtomRange> {
        self.ranges.insert(symbol.into(), range.into())
    }

    /// Get the range for an element
    pub fn get(&self, symbol: &str) -> Option<AtomRange> {
        self.ranges.get(symbol).copied()
    }

    /// Iterate over all elements in traversal order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&ElementSymbol, AtomRange)> + '_ {
        self.ranges.iter().map(|(symbol, range)| (symbol, *range))
    }

    /// The number of elements
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if there are no elements
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The number of points in the search space (saturating at [`u128::MAX`]). The search space
    /// of no elements has exactly one point, the empty formula.
    pub fn search_space_size(&self) -> u128 {
        self.ranges
            .values()
            .fold(1_u128, |acc, range| acc.saturating_mul(u128::from(range.len())))
    }

    /// Check that every range is valid.
    /// # Errors
    /// [`FormulaError::InvalidRange`] for the first range with a minimum above its maximum.
    pub fn validate(&self) -> Result<(), BoxedError<'static, FormulaError>> {
        for (symbol, range) in &self.ranges {
            if !range.is_valid() {
                return Err(BoxedError::new(
                    FormulaError::InvalidRange,
                    "Invalid atom range",
                    format!(
                        "The range for '{symbol}' has a minimum ({}) above its maximum ({})",
                        range.min, range.max
                    ),
                    Context::show(format!("{symbol}: {}..={}", range.min, range.max)),
                ));
            }
        }
        Ok(())
    }
}

impl<S: Into<ElementSymbol>, R: Into<AtomRange>> FromIterator<(S, R)> for AtomRanges {
    fn from_iter<T: IntoIterator<Item = (S, R)>>(iter: T) -> Self {
        Self {
            ranges: iter
                .into_iter()
                .map(|(s, r)| (s.into(), r.into()))
                .collect(),
        }
    }
}
