use context_error::{BoxedError, Context, CreateError};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::{
    chemistry::{Formula, MassTable},
    error::FormulaError,
    search::{AtomRanges, CancellationToken, FormulaEnumerator, MassWindow},
};

/// The default maximal number of atoms in a candidate formula
pub const DEFAULT_MAX_TOTAL_ATOMS: u32 = 150;

/// The default range of accepted unsaturation values (inclusive)
pub const DEFAULT_UNSATURATION_RANGE: (f64, f64) = (0.0, 100.0);

/// A formula that explains the target mass.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CandidateResult {
    /// The formula
    pub formula: Formula,
    /// The monoisotopic mass of the neutral formula
    pub mass: f64,
    /// The mass of the ion, the neutral mass plus the ionization adjustment
    #[serde(rename = "m/z")]
    pub mz: f64,
    /// The deviation of the neutral mass from the de-ionized target in ppm, positive if this
    /// formula is lighter than the target
    pub deviation: f64,
    /// The degree of unsaturation
    pub unsaturation: f64,
}

/// A formula search over a fixed search space. The configuration is only borrowed, it is never
/// changed by a search so the same configuration can be shared between many searches.
/// ```
/// # use mzformula::prelude::*;
/// let ranges = AtomRanges::empty().with("C", 0, 10).with("H", 0, 20).with("O", 0, 5);
/// let masses = MassTable::default();
/// let results = FormulaSearch::new(&ranges, &masses)
///     .unsaturation_range(0.0, 10.0)
///     .run(47.04914, 10.0, PROTON_MASS) // [M+H]+ of ethanol
///     .unwrap();
/// assert_eq!(results[0].formula.to_string(), "C2H6O1");
/// ```
#[derive(Clone, Debug)]
pub struct FormulaSearch<'a> {
    atom_ranges: &'a AtomRanges,
    masses: &'a MassTable,
    unsaturation_range: (f64, f64),
    max_total_atoms: u32,
    valence_filter: bool,
    cancellation: Option<CancellationToken>,
}

impl<'a> FormulaSearch<'a> {
    /// Create a search over the given atom ranges with the default settings: unsaturation range
    /// [`DEFAULT_UNSATURATION_RANGE`], [`DEFAULT_MAX_TOTAL_ATOMS`], no valence filter, and no
    /// cancellation.
    pub const fn new(atom_ranges: &'a AtomRanges, masses: &'a MassTable) -> Self {
        Self {
            atom_ranges,
            masses,
            unsaturation_range: DEFAULT_UNSATURATION_RANGE,
            max_total_atoms: DEFAULT_MAX_TOTAL_ATOMS,
            valence_filter: false,
            cancellation: None,
        }
    }

    /// Only accept formulas with an unsaturation in `low..=high`
    #[must_use]
    pub fn unsaturation_range(self, low: f64, high: f64) -> Self {
        Self {
            unsaturation_range: (low, high),
            ..self
        }
    }

    /// Only accept formulas with at most this many atoms
    #[must_use]
    pub fn max_total_atoms(self, max_total_atoms: u32) -> Self {
        Self {
            max_total_atoms,
            ..self
        }
    }

    /// Also require [`Formula::is_valid`] for all candidates. Note that this check does not
    /// reject any formula at the moment.
    #[must_use]
    pub fn valence_filter(self, valence_filter: bool) -> Self {
        Self {
            valence_filter,
            ..self
        }
    }

    /// Stop the search (with an error) when this token is cancelled
    #[must_use]
    pub fn cancellation(self, token: CancellationToken) -> Self {
        Self {
            cancellation: Some(token),
            ..self
        }
    }

    /// The mass window that is searched for a target m/z, tolerance in ppm, and ionization
    /// adjustment. The tolerance is relative to the de-ionized mass.
    pub fn window(target_mass: f64, ppm_tolerance: f64, ionization: f64) -> MassWindow {
        MassWindow::ppm(target_mass - ionization, ppm_tolerance)
    }

    /// Find all formulas in the search space that explain the target mass, sorted on absolute
    /// deviation (smallest first). Formulas with the same absolute deviation stay in the order in
    /// which they were generated.
    /// # Errors
    /// * [`FormulaError::InvalidParameter`] if the target mass is not positive, the tolerance is
    ///   negative, the unsaturation range is inverted, or the maximal number of atoms is zero.
    /// * [`FormulaError::InvalidRange`], [`FormulaError::MissingMassEntry`], or
    ///   [`FormulaError::InvalidMass`] if the search space is not properly defined.
    /// * [`FormulaError::Cancelled`] if the cancellation token was cancelled during the search.
    /// * [`FormulaError::DivisionByZero`] if a candidate has a mass of zero.
    pub fn run(
        &self,
        target_mass: f64,
        ppm_tolerance: f64,
        ionization: f64,
    ) -> Result<Vec<CandidateResult>, BoxedError<'static, FormulaError>> {
        self.validate(target_mass, ppm_tolerance, ionization)?;
        let exact_mass = target_mass - ionization;
        let window = Self::window(target_mass, ppm_tolerance, ionization);

        let mut enumerator =
            FormulaEnumerator::new(self.atom_ranges, self.masses, window, self.max_total_atoms)?;
        if let Some(token) = &self.cancellation {
            enumerator = enumerator.with_cancellation(token.clone());
        }
        tracing::debug!(
            %window,
            exact_mass,
            search_space = %enumerator.search_space_size(),
            "Starting formula search"
        );

        let (low, high) = self.unsaturation_range;
        let mut results = Vec::new();
        for formula in enumerator.by_ref() {
            let mass = formula.monoisotopic_mass(self.masses)?;
            let unsaturation = formula.unsaturation();
            if unsaturation < low || unsaturation > high {
                continue;
            }
            if self.valence_filter && !formula.is_valid() {
                continue;
            }
            if mass == 0.0 {
                return Err(BoxedError::new(
                    FormulaError::DivisionByZero,
                    "Zero mass candidate",
                    "The deviation cannot be calculated for a formula without mass",
                    Context::show(formula.to_string()),
                ));
            }
            let deviation = ((exact_mass - mass) / mass) * 1e6;
            tracing::trace!(%formula, mass, deviation, unsaturation, "Accepted candidate");
            results.push(CandidateResult {
                formula,
                mass,
                mz: mass + ionization,
                deviation,
                unsaturation,
            });
        }

        if enumerator.was_cancelled() {
            return Err(BoxedError::new(
                FormulaError::Cancelled,
                "Search cancelled",
                format!(
                    "The search was cancelled after visiting {} of {} compositions",
                    enumerator.visited(),
                    enumerator.search_space_size()
                ),
                Context::none(),
            ));
        }

        results.sort_by_key(|result| OrderedFloat(result.deviation.abs()));
        tracing::debug!(
            visited = enumerator.visited(),
            accepted = results.len(),
            "Finished formula search"
        );
        Ok(results)
    }

    fn validate(
        &self,
        target_mass: f64,
        ppm_tolerance: f64,
        ionization: f64,
    ) -> Result<(), BoxedError<'static, FormulaError>> {
        let invalid = |description: String, shown: String| {
            Err(BoxedError::new(
                FormulaError::InvalidParameter,
                "Invalid search parameter",
                description,
                Context::show(shown),
            ))
        };
        if !(target_mass.is_finite() && target_mass > 0.0) {
            return invalid(
                "The target mass has to be a finite positive number".to_string(),
                target_mass.to_string(),
            );
        }
        if !(ppm_tolerance.is_finite() && ppm_tolerance >= 0.0) {
            return invalid(
                "The tolerance has to be a finite number of at least zero ppm".to_string(),
                ppm_tolerance.to_string(),
            );
        }
        if !ionization.is_finite() {
            return invalid(
                "The ionization adjustment has to be a finite number".to_string(),
                ionization.to_string(),
            );
        }
        let (low, high) = self.unsaturation_range;
        if low.is_nan() || high.is_nan() || low > high {
            return invalid(
                "The unsaturation range has to have its low end below or at its high end"
                    .to_string(),
                format!("{low}..={high}"),
            );
        }
        if self.max_total_atoms == 0 {
            return invalid(
                "The maximal number of atoms has to be at least one".to_string(),
                self.max_total_atoms.to_string(),
            );
        }
        Ok(())
    }
}

/// Find the molecular formulas that explain an observed mass within the given tolerance (in
/// ppm). The ionization adjustment is subtracted from the target to get the neutral mass and
/// only formulas with an unsaturation inside the (inclusive) range are returned. At most
/// [`DEFAULT_MAX_TOTAL_ATOMS`] atoms are allowed, use [`FormulaSearch`] for more control.
/// # Errors
/// See [`FormulaSearch::run`].
pub fn find_molecular_formulas(
    target_mass: f64,
    ppm_tolerance: f64,
    atom_ranges: &AtomRanges,
    masses: &MassTable,
    ionization: f64,
    unsaturation_range: (f64, f64),
) -> Result<Vec<CandidateResult>, BoxedError<'static, FormulaError>> {
    FormulaSearch::new(atom_ranges, masses)
        .unsaturation_range(unsaturation_range.0, unsaturation_range.1)
        .run(target_mass, ppm_tolerance, ionization)
}
