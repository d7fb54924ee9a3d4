//! The [`FormulaError`] which makes it easy for downstream users of the error type to match on the exact error.

use context_error::ErrorKind;

/// All the ways a formula search can fail. Apart from [`Self::Cancelled`] all of these are
/// detected before the first candidate is generated.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum FormulaError {
    /// An atom range was defined with a minimum above its maximum
    InvalidRange,
    /// An element is used in a search or formula but has no entry in the mass table
    #[default]
    MissingMassEntry,
    /// A mass table entry is not a finite positive number
    InvalidMass,
    /// A search parameter (target mass, tolerance, unsaturation range, atom cap) is out of bounds
    InvalidParameter,
    /// A candidate with a mass of zero reached the deviation calculation
    DivisionByZero,
    /// The search was stopped by its cancellation token
    Cancelled,
    /// The search parameters could not be read or refer to unknown entries
    InvalidConfiguration,
}

impl ErrorKind for FormulaError {
    type Settings = ();
    fn descriptor(&self) -> &'static str {
        "error"
    }
    fn ignored(&self, _settings: Self::Settings) -> bool {
        false
    }
    fn is_error(&self, _settings: Self::Settings) -> bool {
        true
    }
}
