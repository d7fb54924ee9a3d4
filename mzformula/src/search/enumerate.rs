use std::{
    iter::FusedIterator,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use context_error::BoxedError;

use crate::{
    chemistry::{ElementSymbol, Formula, MassTable},
    error::FormulaError,
    search::{AtomRanges, MassWindow},
};

/// The number of points of the search space that are visited between checks of the
/// [`CancellationToken`].
pub const CANCELLATION_CHECK_INTERVAL: u64 = 4096;

/// A flag that can be set from any thread to stop a running search. Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Create a new token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask all searches using this token to stop
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Check if [`Self::cancel`] has been called on this token or any of its clones
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Debug)]
struct Dimension {
    symbol: ElementSymbol,
    min: u32,
    max: u32,
    mass: f64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Fresh,
    Running,
    Done,
}

/// Lazily generate all formulas in the search space spanned by a set of [`AtomRanges`] whose
/// total number of atoms is in `1..=max_total_atoms` and whose mass lies in the mass window.
///
/// The search space is traversed as an odometer: the last element in the atom ranges turns
/// fastest, all counts go up from the minimum to the maximum. Every point is visited, the atom
/// count and mass only decide if a point is yielded. Creating a new enumerator from the same
/// inputs gives the same formulas in the same order.
#[derive(Clone, Debug)]
pub struct FormulaEnumerator {
    dimensions: Vec<Dimension>,
    counters: Vec<u32>,
    window: MassWindow,
    max_total_atoms: u32,
    state: State,
    search_space_size: u128,
    visited: u64,
    cancellation: Option<CancellationToken>,
    cancelled: bool,
}

impl FormulaEnumerator {
    /// Set up the enumeration. All ranges and all needed masses are checked before anything is
    /// generated.
    /// # Errors
    /// [`FormulaError::InvalidRange`] if any range has its minimum above its maximum.
    /// [`FormulaError::MissingMassEntry`] or [`FormulaError::InvalidMass`] if any element in the
    /// ranges does not have a proper mass in the mass table.
    pub fn new(
        ranges: &AtomRanges,
        masses: &MassTable,
        window: MassWindow,
        max_total_atoms: u32,
    ) -> Result<Self, BoxedError<'static, FormulaError>> {
        ranges.validate()?;
        let mut dimensions = Vec::with_capacity(ranges.len());
        for (symbol, range) in ranges.iter() {
            dimensions.push(Dimension {
                symbol: symbol.clone(),
                min: range.min,
                max: range.max,
                mass: masses.resolve(symbol)?,
            });
        }
        Ok(Self {
            counters: dimensions.iter().map(|d| d.min).collect(),
            dimensions,
            window,
            max_total_atoms,
            state: State::Fresh,
            search_space_size: ranges.search_space_size(),
            visited: 0,
            cancellation: None,
            cancelled: false,
        })
    }

    /// Stop the enumeration once the given token is cancelled, checked every
    /// [`CANCELLATION_CHECK_INTERVAL`] points (starting with the very first one).
    #[must_use]
    pub fn with_cancellation(self, token: CancellationToken) -> Self {
        Self {
            cancellation: Some(token),
            ..self
        }
    }

    /// The mass window used to filter the formulas
    pub const fn window(&self) -> MassWindow {
        self.window
    }

    /// The number of points of the search space visited so far, yielded or not
    pub const fn visited(&self) -> u64 {
        self.visited
    }

    /// The total number of points in the search space (saturating at [`u128::MAX`])
    pub const fn search_space_size(&self) -> u128 {
        self.search_space_size
    }

    /// Check if the enumeration ended because its cancellation token was cancelled, in which
    /// case not all formulas were generated.
    pub const fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Move the counters to the next point, returns false if all points have been visited.
    fn advance(&mut self) -> bool {
        for (counter, dimension) in self.counters.iter_mut().zip(&self.dimensions).rev() {
            if *counter < dimension.max {
                *counter += 1;
                return true;
            }
            *counter = dimension.min;
        }
        false
    }

    fn should_stop(&self) -> bool {
        (self.visited - 1) % CANCELLATION_CHECK_INTERVAL == 0
            && self
                .cancellation
                .as_ref()
                .is_some_and(CancellationToken::is_cancelled)
    }

    fn current_formula(&self) -> Formula {
        self.dimensions
            .iter()
            .zip(&self.counters)
            .map(|(dimension, count)| (dimension.symbol.clone(), *count))
            .collect()
    }
}

impl Iterator for FormulaEnumerator {
    type Item = Formula;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                State::Done => return None,
                State::Fresh => self.state = State::Running,
                State::Running => {
                    if !self.advance() {
                        self.state = State::Done;
                        return None;
                    }
                }
            }
            self.visited += 1;
            if self.should_stop() {
                self.cancelled = true;
                self.state = State::Done;
                return None;
            }

            let total: u64 = self.counters.iter().map(|n| u64::from(*n)).sum();
            if total == 0 || total > u64::from(self.max_total_atoms) {
                continue;
            }
            let mass: f64 = self
                .dimensions
                .iter()
                .zip(&self.counters)
                .map(|(dimension, count)| dimension.mass * f64::from(*count))
                .sum();
            if self.window.contains(mass) {
                return Some(self.current_formula());
            }
        }
    }
}

impl FusedIterator for FormulaEnumerator {}
