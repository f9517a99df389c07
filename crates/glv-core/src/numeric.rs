//! Float helpers shared across the workspace.

/// Absolute/relative tolerance pair for comparing abundances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::new(1e-12, 1e-9)
    }
}

impl Tolerances {
    pub const fn new(abs: f64, rel: f64) -> Self {
        Self { abs, rel }
    }

    /// True when `a` and `b` agree within either the absolute or the
    /// relative tolerance.
    pub fn close(&self, a: f64, b: f64) -> bool {
        let diff = (a - b).abs();
        diff <= self.abs || diff <= self.rel * a.abs().max(b.abs())
    }
}

/// Position and value of the first NaN or infinite entry.
pub fn first_non_finite(values: &[f64]) -> Option<(usize, f64)> {
    values
        .iter()
        .copied()
        .enumerate()
        .find(|(_, v)| !v.is_finite())
}
