//! Searching for the formulas that explain a mass.
mod enumerate;
mod formula_search;
mod range;
mod window;

pub use enumerate::*;
pub use formula_search::*;
pub use range::*;
pub use window::*;
