mod element;
#[macro_use]
mod formula;
mod ionization;
mod mass;
mod valence;

pub use element::*;
pub use formula::*;
pub use ionization::*;
pub use mass::*;
