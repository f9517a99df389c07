//! Coexistence scoring of interaction topologies.

use glv_core::{GlvError, GlvResult};
use nalgebra::DVector;
use rand::Rng;

use crate::glv::GlvModel;
use crate::sim::{SimOptions, sample_times};
use crate::topology::{InteractionTemplate, RandomInteractions};

/// Number of species whose abundance is strictly above `threshold`.
pub fn richness(x: &DVector<f64>, threshold: f64) -> usize {
    x.iter().filter(|&&v| v > threshold).count()
}

/// Mean richness over `end_states`, divided by the species count.
///
/// Returns 0 for an empty set.
pub fn mean_richness_fraction(end_states: &[DVector<f64>], threshold: f64) -> f64 {
    let Some(first) = end_states.first() else {
        return 0.0;
    };
    let n = first.len();
    if n == 0 {
        return 0.0;
    }
    let total: usize = end_states.iter().map(|x| richness(x, threshold)).sum();
    total as f64 / (end_states.len() * n) as f64
}

/// The last state `simulate(t_end, dt)` would record, reached by stepping
/// in place instead of keeping the trajectory. The model is left there.
pub fn last_recorded_state(model: &mut GlvModel, t_end: f64, dt: f64) -> GlvResult<DVector<f64>> {
    let samples = sample_times(t_end, dt, SimOptions::default().max_samples)?.len();
    for _ in 1..samples {
        model.step(dt);
    }
    Ok(model.state().clone())
}

/// Monte-Carlo estimate of how many species a topology tends to sustain.
///
/// For each of `coefficient_draws` random interaction matrices, runs
/// `starts` simulations from uniform random initial abundances in [0, 1)
/// and scores the last recorded state of each with [`mean_richness_fraction`].
#[derive(Clone, Debug)]
pub struct CoexistenceSearch {
    pub coefficient_draws: usize,
    pub starts: usize,
    pub t_end: f64,
    pub dt: f64,
    /// Abundance above which a species counts as present
    pub threshold: f64,
    /// Intrinsic growth rate given to every species
    pub growth_rate: f64,
    pub interactions: RandomInteractions,
}

impl Default for CoexistenceSearch {
    fn default() -> Self {
        Self {
            coefficient_draws: 10,
            starts: 3,
            t_end: 50.0,
            dt: 0.01,
            threshold: 0.01,
            growth_rate: 1.0,
            interactions: RandomInteractions::default(),
        }
    }
}

impl CoexistenceSearch {
    pub fn score<R: Rng>(&self, template: &InteractionTemplate, rng: &mut R) -> GlvResult<f64> {
        if self.coefficient_draws == 0 || self.starts == 0 {
            return Err(GlvError::InvalidArgument {
                what: "coexistence search needs at least one draw and one start",
            });
        }

        let n = template.n();
        let rates = vec![self.growth_rate; n];
        let mut end_states = Vec::with_capacity(self.coefficient_draws * self.starts);

        for _ in 0..self.coefficient_draws {
            let a = self.interactions.sample(template, rng);
            for _ in 0..self.starts {
                let mut model = GlvModel::new(n)?;
                model.set_rates(&rates)?;
                model.set_matrix_dense(&a)?;
                let x0: Vec<f64> = (0..n).map(|_| rng.r#gen::<f64>()).collect();
                model.set_state(&x0)?;

                end_states.push(last_recorded_state(&mut model, self.t_end, self.dt)?);
            }
        }

        let score = mean_richness_fraction(&end_states, self.threshold);
        tracing::debug!(
            species = n,
            edges = template.edge_count(),
            runs = end_states.len(),
            score,
            "Scored interaction topology"
        );
        Ok(score)
    }
}
