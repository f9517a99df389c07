//! Generalized Lotka-Volterra model.
//!
//! Dynamics: dx/dt = x ⊙ (r + A·x), where `x` holds species abundances, `r`
//! the intrinsic growth rates and `A[i][j]` the per-capita effect of species
//! j on the growth rate of species i.

use glv_core::error::ensure_len;
use glv_core::{GlvError, GlvResult};
use nalgebra::{DMatrix, DVector};

use crate::integrator::{ForwardEuler, Integrator};
use crate::model::TransientModel;

/// State and parameters of an n-species GLV system.
///
/// All storage is owned: setters copy their input, so the caller's buffers
/// and the model never alias.
#[derive(Clone, Debug, PartialEq)]
pub struct GlvModel {
    n: usize,
    x: DVector<f64>,
    r: DVector<f64>,
    a: DMatrix<f64>,
}

impl GlvModel {
    /// Create a model for `n` species with zero state, rates and interactions.
    pub fn new(n: usize) -> GlvResult<Self> {
        if n == 0 {
            return Err(GlvError::InvalidArgument {
                what: "species count must be positive",
            });
        }
        Ok(Self {
            n,
            x: DVector::zeros(n),
            r: DVector::zeros(n),
            a: DMatrix::zeros(n, n),
        })
    }

    /// Number of species.
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn state(&self) -> &DVector<f64> {
        &self.x
    }

    pub fn rates(&self) -> &DVector<f64> {
        &self.r
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.a
    }

    /// Replace the current abundances. Returns the stored copy.
    pub fn set_state(&mut self, state: &[f64]) -> GlvResult<&[f64]> {
        ensure_len("state", self.n, state.len())?;
        self.x = DVector::from_column_slice(state);
        Ok(self.x.as_slice())
    }

    /// Replace the intrinsic growth rates. Returns the stored copy.
    pub fn set_rates(&mut self, rates: &[f64]) -> GlvResult<&[f64]> {
        ensure_len("rates", self.n, rates.len())?;
        self.r = DVector::from_column_slice(rates);
        Ok(self.r.as_slice())
    }

    /// Replace the interaction matrix from its rows.
    ///
    /// Every row is checked before anything is copied, so a ragged input
    /// leaves the previous matrix in place.
    pub fn set_matrix<R: AsRef<[f64]>>(&mut self, rows: &[R]) -> GlvResult<&DMatrix<f64>> {
        ensure_len("interaction matrix rows", self.n, rows.len())?;
        for row in rows {
            ensure_len("interaction matrix row", self.n, row.as_ref().len())?;
        }
        self.a = DMatrix::from_row_iterator(
            self.n,
            self.n,
            rows.iter().flat_map(|row| row.as_ref().iter().copied()),
        );
        Ok(&self.a)
    }

    /// Replace the interaction matrix from a row-major buffer of n² entries.
    pub fn set_matrix_flat(&mut self, entries: &[f64]) -> GlvResult<&DMatrix<f64>> {
        ensure_len("interaction matrix entries", self.n * self.n, entries.len())?;
        self.a = DMatrix::from_row_slice(self.n, self.n, entries);
        Ok(&self.a)
    }

    /// Replace the interaction matrix with an already-built one.
    pub fn set_matrix_dense(&mut self, matrix: &DMatrix<f64>) -> GlvResult<&DMatrix<f64>> {
        ensure_len("interaction matrix rows", self.n, matrix.nrows())?;
        ensure_len("interaction matrix columns", self.n, matrix.ncols())?;
        self.a = matrix.clone();
        Ok(&self.a)
    }

    /// Evaluate x ⊙ (r + A·x) at `x`.
    pub fn derivative(&self, x: &DVector<f64>) -> DVector<f64> {
        let growth = &self.r + &self.a * x;
        x.component_mul(&growth)
    }

    /// Advance the state by one forward-Euler step of size `dt`.
    ///
    /// Any real `dt` is accepted; a negative one integrates backward and
    /// zero leaves the state untouched.
    pub fn step(&mut self, dt: f64) {
        if dt == 0.0 {
            return;
        }
        self.x = ForwardEuler.step(&*self, 0.0, &self.x, dt);
    }

    pub(crate) fn replace_state(&mut self, x: DVector<f64>) {
        debug_assert_eq!(x.len(), self.n);
        self.x = x;
    }
}

impl TransientModel for GlvModel {
    type State = DVector<f64>;

    // Autonomous system: t is unused.
    fn rhs(&self, _t: f64, x: &Self::State) -> Self::State {
        self.derivative(x)
    }

    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State {
        a + b
    }

    fn scale(&self, a: &Self::State, scale: f64) -> Self::State {
        a * scale
    }
}
