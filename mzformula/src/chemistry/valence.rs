use crate::chemistry::{Formula, VALENCIES};

impl Formula {
    /// The summed valency of all atoms in this formula, using the fixed [`VALENCIES`] table.
    /// Elements not in that table do not contribute.
    pub fn total_valency(&self) -> u64 {
        self.elements()
            .iter()
            .map(|(symbol, count)| u64::from(symbol.valency().unwrap_or(0)) * u64::from(*count))
            .sum()
    }

    /// Check that the number of bonds in this formula does not exceed the bonding capacity of
    /// its atoms.
    ///
    /// Note that both sides of the comparison are derived from the same [`VALENCIES`] table and
    /// the same counts, so this check currently accepts every formula. It is kept as the hook
    /// for a real connectivity rule and is not part of the default search, see
    /// [`FormulaSearch::valence_filter`](crate::search::FormulaSearch::valence_filter).
    pub fn is_valid(&self) -> bool {
        let total_bonds: u64 = VALENCIES
            .iter()
            .map(|(symbol, valency)| u64::from(*valency) * u64::from(self.count(symbol)))
            .sum();
        total_bonds <= self.total_valency()
    }
}
