#![doc = include_str!("../README.md")]

/// Contains all things related to the underlying chemistry: elements, formulas, masses, and ionization.
pub mod chemistry;
pub mod error;
pub mod parameters;
/// Random generation of formulas, used for property based tests
#[cfg(feature = "rand")]
mod rand;
pub mod search;

/// A subset of the types and traits that are envisioned to be used the most, importing this is a good starting point for working with the crate
pub mod prelude {
    pub use crate::chemistry::{
        ElementSymbol, Formula, IonizationTable, MassTable, PROTON_MASS,
    };
    pub use crate::error::FormulaError;
    pub use crate::formula;
    pub use crate::parameters::SearchParameters;
    pub use crate::search::{
        AtomRange, AtomRanges, CancellationToken, CandidateResult, FormulaEnumerator,
        FormulaSearch, MassWindow, find_molecular_formulas,
    };
}
