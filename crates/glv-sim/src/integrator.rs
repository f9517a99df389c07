//! Fixed-step time integrators.

use crate::model::TransientModel;

/// Trait for time integrators.
pub trait Integrator {
    /// Advance state by one time step using the transient model.
    fn step<M: TransientModel>(&self, model: &M, t: f64, x: &M::State, dt: f64) -> M::State;
}

/// Forward Euler (explicit, 1st order).
///
/// The derivative is evaluated once from `x` and only then added, so every
/// component of the new state comes from the same snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(&self, model: &M, t: f64, x: &M::State, dt: f64) -> M::State {
        let xdot = model.rhs(t, x);
        model.add(x, &model.scale(&xdot, dt))
    }
}
