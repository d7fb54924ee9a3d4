use rand::distr::{Distribution, StandardUniform};

use crate::chemistry::{ElementSymbol, Formula};

const SYMBOLS: [&str; 11] = ["C", "H", "N", "O", "S", "F", "Cl", "Br", "I", "P", "Na"];

impl Distribution<ElementSymbol> for StandardUniform {
    fn sample<R: rand::prelude::Rng + ?Sized>(&self, rng: &mut R) -> ElementSymbol {
        ElementSymbol::from(SYMBOLS[rng.random_range(0..SYMBOLS.len())])
    }
}

impl Distribution<Formula> for StandardUniform {
    fn sample<R: rand::prelude::Rng + ?Sized>(&self, rng: &mut R) -> Formula {
        let mut formula = Formula::default();
        for _ in 0..rng.random_range(0..16) {
            let element: ElementSymbol = rng.random();
            formula.add_element((element, rng.random_range(0..64)));
        }
        formula
    }
}

/// A mass table covering every symbol that can be generated randomly
#[cfg(test)]
pub(crate) fn random_mass_table() -> crate::chemistry::MassTable {
    crate::chemistry::MassTable::default()
        .with("P", 30.973762)
        .with("Na", 22.98976928)
}
