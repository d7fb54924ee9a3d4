use std::ops::{Add, AddAssign};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thin_vec::ThinVec;

use crate::chemistry::ElementSymbol;

/// Easily define molecular formulas using the following syntax: `<element> <num>`
/// ```
/// # use mzformula::*;
/// let ethene = formula!(C 2 H 4);
/// assert_eq!(ethene.count("H"), 4);
/// assert_eq!(ethene.to_string(), "C2H4");
/// ```
#[macro_export]
macro_rules! formula {
    ($($element:ident $count:literal)+) => {
        $crate::chemistry::Formula::new([
            $(($crate::chemistry::ElementSymbol::from(stringify!($element)), $count)),+
        ])
    };
}

/// A molecular formula, a mapping of elements to their (non negative) number of atoms.
///
/// The elements are kept in the order in which they were first added, which is the order used
/// when displaying the formula. Elements with zero atoms are not stored, so two formulas are
/// equal when they contain the same number of atoms for every element, independent of order.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(
    from = "IndexMap<ElementSymbol, u32>",
    into = "IndexMap<ElementSymbol, u32>"
)]
pub struct Formula {
    elements: ThinVec<(ElementSymbol, u32)>,
}

impl Formula {
    /// Create a new formula, repeated elements are merged and zero counts are dropped.
    pub fn new(elements: impl IntoIterator<Item = (ElementSymbol, u32)>) -> Self {
        let mut formula = Self::default();
        for element in elements {
            formula.add_element(element);
        }
        formula
    }

    /// Add the given number of atoms of an element to this formula, the count saturates at
    /// [`u32::MAX`].
    pub fn add_element(&mut self, (symbol, count): (ElementSymbol, u32)) {
        if count == 0 {
            return;
        }
        if let Some(existing) = self.elements.iter_mut().find(|(s, _)| *s == symbol) {
            existing.1 = existing.1.saturating_add(count);
        } else {
            self.elements.push((symbol, count));
        }
    }

    /// The elements with their counts, in insertion order, never containing zero counts
    pub fn elements(&self) -> &[(ElementSymbol, u32)] {
        &self.elements
    }

    /// The number of atoms of the given element, zero if not present
    pub fn count(&self, symbol: &str) -> u32 {
        self.elements
            .iter()
            .find(|(s, _)| s.as_str() == symbol)
            .map_or(0, |(_, n)| *n)
    }

    /// The total number of atoms
    pub fn total_atoms(&self) -> u64 {
        self.elements.iter().map(|(_, n)| u64::from(*n)).sum()
    }

    /// Check if this formula has no atoms at all
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.elements.len() == other.elements.len()
            && self
                .elements
                .iter()
                .all(|(symbol, count)| other.count(symbol.as_str()) == *count)
    }
}

impl Eq for Formula {}

impl From<IndexMap<ElementSymbol, u32>> for Formula {
    fn from(value: IndexMap<ElementSymbol, u32>) -> Self {
        Self::new(value)
    }
}

impl From<Formula> for IndexMap<ElementSymbol, u32> {
    fn from(value: Formula) -> Self {
        value.elements.into_iter().collect()
    }
}

impl FromIterator<(ElementSymbol, u32)> for Formula {
    fn from_iter<T: IntoIterator<Item = (ElementSymbol, u32)>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl AddAssign<&Self> for Formula {
    fn add_assign(&mut self, rhs: &Self) {
        for element in &rhs.elements {
            self.add_element(element.clone());
        }
    }
}

impl Add<&Formula> for &Formula {
    type Output = Formula;
    fn add(self, rhs: &Formula) -> Self::Output {
        let mut result = self.clone();
        result += rhs;
        result
    }
}

impl Add for Formula {
    type Output = Self;
    fn add(mut self, rhs: Self) -> Self::Output {
        self += &rhs;
        self
    }
}

/// Element and count concatenated for every element in insertion order, for example `C2H6O1`.
impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (symbol, count) in &self.elements {
            write!(f, "{symbol}{count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use super::Formula;
    use crate::chemistry::ElementSymbol;

    #[test]
    fn zeros_removed() {
        let formula = Formula::new([
            (ElementSymbol::from("C"), 2),
            (ElementSymbol::from("N"), 0),
            (ElementSymbol::from("H"), 4),
        ]);
        assert_eq!(formula.elements().len(), 2);
        assert_eq!(formula.count("N"), 0);
        assert_eq!(formula, crate::formula!(C 2 H 4));
        assert!(Formula::new([(ElementSymbol::from("C"), 0)]).is_empty());
    }

    #[test]
    fn order_independent_equality() {
        assert_eq!(crate::formula!(C 2 H 6 O 1), crate::formula!(O 1 H 6 C 2));
        assert_ne!(crate::formula!(C 2 H 6), crate::formula!(C 2 H 6 O 1));
        assert_ne!(crate::formula!(C 2 H 6 O 1), crate::formula!(C 2 H 6));
        assert_ne!(crate::formula!(C 2 H 6), crate::formula!(C 2 H 5));
    }

    #[test]
    fn merged() {
        assert_eq!(crate::formula!(H 1 O 1 H 1), crate::formula!(H 2 O 1));
        assert_eq!(
            crate::formula!(H 1 O 1) + crate::formula!(H 1 O 1),
            crate::formula!(H 2 O 2)
        );
        assert_eq!(
            &crate::formula!(C 1) + &crate::formula!(H 4),
            crate::formula!(C 1 H 4)
        );
    }

    #[test]
    fn add_element_on_values() {
        let mut formula = crate::formula!(C 1);
        formula.add_element(("H".into(), 4));
        formula.add_element(("C".into(), 1));
        formula.add_element(("N".into(), 0));
        assert_eq!(formula, crate::formula!(C 2 H 4));
        assert_eq!(formula.to_string(), "C2H4");
        let total = formula + crate::formula!(O 1);
        assert_eq!(total, crate::formula!(C 2 H 4 O 1));
    }

    #[test]
    fn counts_saturate() {
        let mut formula = Formula::new([(ElementSymbol::from("C"), u32::MAX - 1)]);
        formula.add_element(("C".into(), 5));
        assert_eq!(formula.count("C"), u32::MAX);
        let merged = &formula + &crate::formula!(C 1);
        assert_eq!(merged.count("C"), u32::MAX);
        let collected: Formula = [(ElementSymbol::from("H"), u32::MAX), ("H".into(), u32::MAX)]
            .into_iter()
            .collect();
        assert_eq!(collected.count("H"), u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(crate::formula!(C 2 H 6 O 1).to_string(), "C2H6O1");
        assert_eq!(crate::formula!(Br 1 C 1).to_string(), "Br1C1");
        assert_eq!(Formula::default().to_string(), "");
    }

    #[test]
    fn total_atoms() {
        assert_eq!(crate::formula!(C 6 H 12 O 6).total_atoms(), 24);
        assert_eq!(Formula::default().total_atoms(), 0);
    }

    #[test]
    fn serde_as_map() {
        let formula = crate::formula!(C 2 H 4);
        let json = serde_json::to_string(&formula).unwrap();
        assert_eq!(json, r#"{"C":2,"H":4}"#);
        assert_eq!(serde_json::from_str::<Formula>(&json).unwrap(), formula);
        assert_eq!(
            serde_json::from_str::<Formula>(r#"{"C":2,"N":0,"H":4}"#).unwrap(),
            formula
        );
    }
}
