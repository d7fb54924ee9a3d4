use context_error::{BoxedError, Context, CreateError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    chemistry::{ElementSymbol, Formula, HALOGENS},
    error::FormulaError,
};

/// The monoisotopic masses of elements in Dalton.
///
/// The [`Default`] table contains the masses from [Unimod](https://www.unimod.org/masses.html) for
/// the elements commonly found in small organic molecules: H, C, N, O, S, F, Br, Cl, and I.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MassTable {
    masses: IndexMap<ElementSymbol, f64>,
}

impl Default for MassTable {
    fn default() -> Self {
        Self::empty()
            .with("H", 1.007825035)
            .with("C", 12.0)
            .with("N", 14.003074)
            .with("O", 15.99491463)
            .with("S", 31.9720707)
            .with("F", 18.99840322)
            .with("Br", 78.9183361)
            .with("Cl", 34.96885272)
            .with("I", 126.904473)
    }
}

impl MassTable {
    /// A table without any elements
    pub fn empty() -> Self {
        Self {
            masses: IndexMap::new(),
        }
    }

    /// Set the mass of the given element, replacing any previous mass
    #[must_use]
    pub fn with(mut self, symbol: impl Into<ElementSymbol>, mass: f64) -> Self {
        self.insert(symbol, mass);
        self
    }

    /// Set the mass of the given element, returning the previous mass if there was one
    pub fn insert(&mut self, symbol: impl Into<ElementSymbol>, mass: f64) -> Option<f64> {
        self.masses.insert(symbol.into(), mass)
    }

    /// Get the mass of the given element
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.masses.get(symbol).copied()
    }

    /// Get the mass of the given element, or an error if the element is not present or its
    /// mass is not a finite positive number.
    /// # Errors
    /// [`FormulaError::MissingMassEntry`] or [`FormulaError::InvalidMass`].
    pub fn resolve(&self, symbol: &ElementSymbol) -> Result<f64, BoxedError<'static, FormulaError>> {
        let mass = self.get(symbol.as_str()).ok_or_else(|| {
            BoxedError::new(
                FormulaError::MissingMassEntry,
                "Missing mass",
                format!("The element '{symbol}' has no entry in the mass table"),
                Context::show(symbol.to_string()),
            )
        })?;
        if mass.is_finite() && mass > 0.0 {
            Ok(mass)
        } else {
            Err(BoxedError::new(
                FormulaError::InvalidMass,
                "Invalid mass",
                format!("The mass of '{symbol}' has to be a finite positive number, not {mass}"),
                Context::show(symbol.to_string()),
            ))
        }
    }

    /// Iterate over all elements and their masses
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&ElementSymbol, f64)> + '_ {
        self.masses.iter().map(|(symbol, mass)| (symbol, *mass))
    }

    /// The number of elements in this table
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Check if this table is empty
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }
}

impl<S: Into<ElementSymbol>> FromIterator<(S, f64)> for MassTable {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self {
            masses: iter.into_iter().map(|(s, m)| (s.into(), m)).collect(),
        }
    }
}

impl Formula {
    /// The monoisotopic mass of this formula given the masses in the table.
    /// # Errors
    /// [`FormulaError::MissingMassEntry`] if an element of this formula is not in the table.
    pub fn monoisotopic_mass(
        &self,
        masses: &MassTable,
    ) -> Result<f64, BoxedError<'static, FormulaError>> {
        let mut mass = 0.0;
        for (symbol, count) in self.elements() {
            let element = masses.get(symbol.as_str()).ok_or_else(|| {
                BoxedError::new(
                    FormulaError::MissingMassEntry,
                    "Missing mass",
                    format!(
                        "The element '{symbol}' of formula '{self}' has no entry in the mass table"
                    ),
                    Context::show(self.to_string()),
                )
            })?;
            mass += element * f64::from(*count);
        }
        Ok(mass)
    }

    /// The degree of unsaturation (double bond equivalents): `C - (H + X)/2 + N/2 + 1` where X
    /// is the number of halogens. Not rounded, so odd electron formulas give half values.
    pub fn unsaturation(&self) -> f64 {
        let count = |symbol: &str| f64::from(self.count(symbol));
        let halogens: f64 = HALOGENS.into_iter().map(count).sum();
        count("C") - (count("H") + halogens) / 2.0 + count("N") / 2.0 + 1.0
    }
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use context_error::*;

    use super::MassTable;
    use crate::{chemistry::Formula, error::FormulaError, formula};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn masses() {
        let table = MassTable::default();
        assert!(close(
            formula!(C 2 H 4).monoisotopic_mass(&table).unwrap(),
            28.03130014
        ));
        assert!(close(
            formula!(H 2 O 1).monoisotopic_mass(&table).unwrap(),
            18.01056470
        ));
        assert!(close(Formula::default().monoisotopic_mass(&table).unwrap(), 0.0));
    }

    #[test]
    fn missing_mass() {
        let table = MassTable::empty().with("C", 12.0);
        let error = formula!(C 1 H 4).monoisotopic_mass(&table).unwrap_err();
        assert_eq!(error.get_kind(), FormulaError::MissingMassEntry);
    }

    #[test]
    fn resolve() {
        let table = MassTable::empty().with("C", 12.0).with("X", 0.0).with("Y", f64::NAN);
        assert!(close(table.resolve(&"C".into()).unwrap(), 12.0));
        assert_eq!(
            table.resolve(&"H".into()).unwrap_err().get_kind(),
            FormulaError::MissingMassEntry
        );
        assert_eq!(
            table.resolve(&"X".into()).unwrap_err().get_kind(),
            FormulaError::InvalidMass
        );
        assert_eq!(
            table.resolve(&"Y".into()).unwrap_err().get_kind(),
            FormulaError::InvalidMass
        );
    }

    #[test]
    fn unsaturation() {
        assert!(close(formula!(C 6 H 6).unsaturation(), 4.0));
        assert!(close(formula!(C 2 H 4).unsaturation(), 1.0));
        assert!(close(formula!(C 1 H 4).unsaturation(), 0.0));
        assert!(close(formula!(C 5 H 5 N 1).unsaturation(), 4.0));
        assert!(close(formula!(C 2 H 3 Cl 1).unsaturation(), 1.0));
        assert!(close(formula!(C 1 H 3).unsaturation(), 0.5));
        assert!(close(formula!(C 1 F 4).unsaturation(), 0.0));
    }

    #[test]
    fn unsaturation_without_counted_elements() {
        assert!(close(formula!(O 2).unsaturation(), 1.0));
        assert!(close(formula!(S 3 O 4).unsaturation(), 1.0));
        assert!(close(Formula::default().unsaturation(), 1.0));
    }

    #[cfg(feature = "rand")]
    #[test]
    fn unsaturation_order_independent() {
        let mut rng = rand::rng();
        for _ in 0..256 {
            let formula: Formula = rand::Rng::random(&mut rng);
            let reversed = Formula::new(formula.elements().iter().rev().cloned());
            assert_eq!(formula, reversed);
            assert!(close(formula.unsaturation(), reversed.unsaturation()));
        }
    }

    #[cfg(feature = "rand")]
    #[test]
    fn mass_additive() {
        let table = crate::rand::random_mass_table();
        let mut rng = rand::rng();
        for _ in 0..256 {
            let a: Formula = rand::Rng::random(&mut rng);
            let b: Formula = rand::Rng::random(&mut rng);
            let combined = (&a + &b).monoisotopic_mass(&table).unwrap();
            let separate =
                a.monoisotopic_mass(&table).unwrap() + b.monoisotopic_mass(&table).unwrap();
            assert!(
                (combined - separate).abs() <= 1e-9 * combined.max(1.0),
                "{a} + {b}: {combined} != {separate}"
            );
        }
    }
}
