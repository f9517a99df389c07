//! TransientModel trait for pluggable dynamic systems.

/// Trait for transient (dynamic) system models.
///
/// A TransientModel must implement:
/// - State type (Clone, for snapshots)
/// - RHS (right-hand side) computation: x_dot = f(t, x)
/// - Vector-space arithmetic for integration: add states, scale by scalar
pub trait TransientModel {
    /// State type (must be Clone).
    type State: Clone;

    /// Compute state derivative dxdt = f(t, x).
    ///
    /// Must read `x` only, never the model's own copy of the state, so an
    /// integrator can evaluate it at trial points.
    fn rhs(&self, t: f64, x: &Self::State) -> Self::State;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;
}
