use serde::{Deserialize, Serialize};

/// An inclusive mass window in Dalton.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct MassWindow {
    /// The lowest accepted mass
    pub min: f64,
    /// The highest accepted mass (inclusive)
    pub max: f64,
}

impl MassWindow {
    /// Create a window from its bounds
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The window of `ppm` parts per million around `center`. The tolerance is relative to the
    /// center, so the window is `center ± center * ppm / 1e6`.
    pub fn ppm(center: f64, ppm: f64) -> Self {
        let tolerance = ppm / 1e6;
        Self {
            min: center - tolerance * center,
            max: center + tolerance * center,
        }
    }

    /// Check if the mass lies in this window, both bounds are inclusive
    pub fn contains(&self, mass: f64) -> bool {
        self.min <= mass && mass <= self.max
    }
}

impl std::fmt::Display for MassWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use super::MassWindow;

    #[test]
    fn ppm() {
        let window = MassWindow::ppm(1_000_000.0, 5.0);
        assert!((window.min - 999_995.0).abs() < 1e-6);
        assert!((window.max - 1_000_005.0).abs() < 1e-6);
        let exact = MassWindow::ppm(30.0, 0.0);
        assert_eq!(exact, MassWindow::new(30.0, 30.0));
        assert!(exact.contains(30.0));
    }

    #[test]
    fn inclusive() {
        let window = MassWindow::new(10.0, 20.0);
        assert!(window.contains(10.0));
        assert!(window.contains(20.0));
        assert!(window.contains(15.0));
        assert!(!window.contains(9.999));
        assert!(!window.contains(20.001));
        assert!(!window.contains(f64::NAN));
    }
}
