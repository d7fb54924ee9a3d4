//! All configurable parameters for a formula search, with JSON (de)serialisation.

use std::any::type_name;

use context_error::{BoxedError, Context, CreateError};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    chemistry::{IonizationTable, MassTable},
    error::FormulaError,
    search::{AtomRanges, DEFAULT_MAX_TOTAL_ATOMS, DEFAULT_UNSATURATION_RANGE, FormulaSearch},
};

/// The full configuration of a formula search. Every field is optional in JSON, missing fields
/// get their default value.
/// ```
/// # use mzformula::parameters::SearchParameters;
/// let parameters = SearchParameters::from_json(
///     r#"{"atom_ranges": {"C": [0, 6], "H": [0, 14], "O": [0, 2]}, "unsaturation_range": [0, 10]}"#,
/// )
/// .unwrap();
/// let results = parameters
///     .search()
///     .run(47.04914, 10.0, parameters.ionization("H+").unwrap())
///     .unwrap();
/// assert_eq!(results[0].formula.to_string(), "C2H6O1");
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct SearchParameters {
    /// The search space
    pub atom_ranges: AtomRanges,
    /// The monoisotopic element masses
    pub masses: MassTable,
    /// The named ionization modes
    pub ionizations: IonizationTable,
    /// The accepted unsaturation values (inclusive)
    pub unsaturation_range: (f64, f64),
    /// The maximal number of atoms in a formula
    pub max_total_atoms: u32,
    /// Apply [`Formula::is_valid`](crate::chemistry::Formula::is_valid) to all candidates
    pub valence_filter: bool,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            atom_ranges: AtomRanges::default(),
            masses: MassTable::default(),
            ionizations: IonizationTable::default(),
            unsaturation_range: DEFAULT_UNSATURATION_RANGE,
            max_total_atoms: DEFAULT_MAX_TOTAL_ATOMS,
            valence_filter: false,
        }
    }
}

impl SearchParameters {
    /// Parse a string containing JSON into search parameters
    /// # Errors
    /// [`FormulaError::InvalidConfiguration`] if the text is not valid JSON or does not describe
    /// search parameters.
    pub fn from_json(value: &str) -> Result<Self, BoxedError<'static, FormulaError>> {
        let value = serde_json::from_str::<Value>(value).map_err(|err| {
            BoxedError::new(
                FormulaError::InvalidConfiguration,
                format!("Invalid JSON (for {})", type_name::<Self>()),
                err.to_string(),
                Context::show(value.to_string()),
            )
        })?;
        Self::from_json_value(value)
    }

    /// Parse a JSON value into search parameters
    /// # Errors
    /// [`FormulaError::InvalidConfiguration`] if the JSON does not describe search parameters.
    #[expect(clippy::needless_pass_by_value)]
    pub fn from_json_value(value: Value) -> Result<Self, BoxedError<'static, FormulaError>> {
        serde_json::from_value(value.clone()).map_err(|err| {
            BoxedError::new(
                FormulaError::InvalidConfiguration,
                format!("Could not parse JSON into {}", type_name::<Self>()),
                err.to_string(),
                Context::show(value.to_string()),
            )
        })
    }

    /// Write these parameters as pretty printed JSON
    /// # Errors
    /// [`FormulaError::InvalidConfiguration`] if the parameters could not be serialised.
    pub fn to_json(&self) -> Result<String, BoxedError<'static, FormulaError>> {
        serde_json::to_string_pretty(self).map_err(|err| {
            BoxedError::new(
                FormulaError::InvalidConfiguration,
                format!("Could not write {} as JSON", type_name::<Self>()),
                err.to_string(),
                Context::none(),
            )
        })
    }

    /// Get the mass adjustment of a named ionization mode
    /// # Errors
    /// [`FormulaError::InvalidConfiguration`] if there is no mode with this name.
    pub fn ionization(&self, name: &str) -> Result<f64, BoxedError<'static, FormulaError>> {
        self.ionizations.get(name).ok_or_else(|| {
            BoxedError::new(
                FormulaError::InvalidConfiguration,
                "Unknown ionization",
                format!(
                    "There is no ionization mode named '{name}', options are: {}",
                    self.ionizations.iter().map(|(n, _)| n).join(", ")
                ),
                Context::show(name.to_string()),
            )
        })
    }

    /// A formula search using these parameters
    pub fn search(&self) -> FormulaSearch<'_> {
        FormulaSearch::new(&self.atom_ranges, &self.masses)
            .unsaturation_range(self.unsaturation_range.0, self.unsaturation_range.1)
            .max_total_atoms(self.max_total_atoms)
            .valence_filter(self.valence_filter)
    }
}
