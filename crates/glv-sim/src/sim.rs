//! Simulation runner and trajectory recording.

use glv_core::{GlvError, GlvResult, first_non_finite};
use nalgebra::DVector;

use crate::glv::GlvModel;
use crate::integrator::{ForwardEuler, Integrator};
use crate::model::TransientModel;

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed time step
    pub dt: f64,
    /// End of the half-open sampling interval [0, t_end)
    pub t_end: f64,
    /// Record every N-th sample (decimation)
    pub record_every: usize,
    /// Upper bound on the number of samples a run may take (safety limit).
    /// Values above [`SAMPLE_LIMIT`] are clamped to it.
    pub max_samples: usize,
}

/// Hard ceiling on samples per run, whatever `max_samples` says.
pub const SAMPLE_LIMIT: usize = 1 << 28;

/// Largest up-front reservation; longer runs grow as they record.
const PREALLOC_LIMIT: usize = 1 << 16;

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1e-3,
            t_end: 1.0,
            record_every: 1,
            max_samples: 10_000_000,
        }
    }
}

impl SimOptions {
    /// Options for a plain run over [0, t_end) recording every sample.
    pub fn new(t_end: f64, dt: f64) -> Self {
        Self {
            dt,
            t_end,
            ..Self::default()
        }
    }
}

/// Recorded (time, state) samples of a run. Index i of `t` pairs with index i of `x`.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory<S = DVector<f64>> {
    /// Sample times
    pub t: Vec<f64>,
    /// State snapshots, taken before the step at the matching time
    pub x: Vec<S>,
}

impl<S> Trajectory<S> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            t: Vec::with_capacity(capacity),
            x: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, t: f64, x: S) -> GlvResult<()> {
        if self.t.len() == self.t.capacity() || self.x.len() == self.x.capacity() {
            let extra = self.t.len().max(1);
            self.t
                .try_reserve(extra)
                .and_then(|_| self.x.try_reserve(extra))
                .map_err(|_| GlvError::InvalidArgument {
                    what: "trajectory does not fit in memory",
                })?;
        }
        self.t.push(t);
        self.x.push(x);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &S)> {
        self.t.iter().copied().zip(self.x.iter())
    }

    /// Last recorded snapshot, if any.
    pub fn final_state(&self) -> Option<&S> {
        self.x.last()
    }
}

impl Trajectory<DVector<f64>> {
    /// Abundance of one species over every recorded sample.
    pub fn species_series(&self, species: usize) -> GlvResult<Vec<f64>> {
        let mut series = Vec::with_capacity(self.len());
        for x in &self.x {
            if species >= x.len() {
                return Err(GlvError::IndexOob {
                    what: "species",
                    index: species,
                    len: x.len(),
                });
            }
            series.push(x[species]);
        }
        Ok(series)
    }
}

/// Sample times `k * dt` for k = 0, 1, 2, ... inside [0, t_end).
///
/// With a negative `dt` the interval runs the other way, (t_end, 0].
/// Each time is a single product rather than a running sum, so the count
/// equals the number of k satisfying the predicate.
pub fn sample_times(t_end: f64, dt: f64, max_samples: usize) -> GlvResult<Vec<f64>> {
    if dt == 0.0 || !dt.is_finite() {
        return Err(GlvError::InvalidArgument {
            what: "dt must be finite and non-zero",
        });
    }
    if !t_end.is_finite() {
        return Err(GlvError::InvalidArgument {
            what: "t_end must be finite",
        });
    }

    let estimate = (t_end / dt).ceil();
    if estimate <= 0.0 {
        return Ok(Vec::new());
    }
    if estimate > max_samples.min(SAMPLE_LIMIT) as f64 {
        return Err(GlvError::InvalidArgument {
            what: "run would exceed max_samples",
        });
    }

    let in_range = |t: f64| if dt > 0.0 { t < t_end } else { t > t_end };
    let mut times = Vec::with_capacity((estimate as usize).min(PREALLOC_LIMIT));
    let mut k: u64 = 0;
    loop {
        let t = k as f64 * dt;
        if !in_range(t) {
            break;
        }
        times.push(t);
        k += 1;
    }
    Ok(times)
}

/// Run a fixed-step forward-Euler simulation of `model` starting from `x0`.
///
/// The state is recorded before each step, so the first sample is `x0`
/// itself. Returns the trajectory together with the state after the last
/// step, which is never recorded.
pub fn run_sim<M: TransientModel>(
    model: &M,
    x0: M::State,
    opts: &SimOptions,
) -> GlvResult<(Trajectory<M::State>, M::State)> {
    if opts.record_every == 0 {
        return Err(GlvError::InvalidArgument {
            what: "record_every must be positive",
        });
    }
    let times = sample_times(opts.t_end, opts.dt, opts.max_samples)?;

    let integrator = ForwardEuler;
    let expected_rows = times.len().div_ceil(opts.record_every);
    let mut record = Trajectory::with_capacity(expected_rows.min(PREALLOC_LIMIT));
    let mut x = x0;
    for (k, &t) in times.iter().enumerate() {
        if k % opts.record_every == 0 {
            record.push(t, x.clone())?;
        }
        x = integrator.step(model, t, &x, opts.dt);
    }
    Ok((record, x))
}

impl GlvModel {
    /// Simulate over [0, t_end) with step `dt`, recording every sample.
    ///
    /// The model's state is advanced through the run and left at the state
    /// after the final step.
    pub fn simulate(&mut self, t_end: f64, dt: f64) -> GlvResult<Trajectory> {
        self.simulate_with(&SimOptions::new(t_end, dt))
    }

    /// Simulate with explicit options. Fails before touching the state if
    /// the options are invalid.
    pub fn simulate_with(&mut self, opts: &SimOptions) -> GlvResult<Trajectory> {
        tracing::debug!(
            species = self.n(),
            t_end = opts.t_end,
            dt = opts.dt,
            record_every = opts.record_every,
            "Starting GLV simulation"
        );

        let (record, x) = run_sim(&*self, self.state().clone(), opts)?;
        if let Some((species, value)) = first_non_finite(x.as_slice()) {
            tracing::warn!(
                species,
                value,
                dt = opts.dt,
                "GLV state became non-finite; dt is likely too large for these dynamics"
            );
        }
        self.replace_state(x);

        tracing::debug!(samples = record.len(), "Finished GLV simulation");
        Ok(record)
    }
}
