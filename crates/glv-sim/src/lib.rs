//! Generalized Lotka-Volterra simulation.
//!
//! Provides:
//! - `GlvModel`: species state, growth rates and interaction matrix
//! - Fixed-step forward-Euler integration behind the `TransientModel` seam
//! - Simulation runner recording (time, state) trajectories
//! - Random interaction matrices over a fixed topology
//! - Coexistence scoring of topologies

pub mod analysis;
pub mod glv;
pub mod integrator;
pub mod model;
pub mod sim;
pub mod topology;

// Re-exports for public API
pub use analysis::{CoexistenceSearch, last_recorded_state, mean_richness_fraction, richness};
pub use glv::GlvModel;
pub use glv_core::{GlvError, GlvResult};
pub use integrator::{ForwardEuler, Integrator};
pub use model::TransientModel;
pub use sim::{SAMPLE_LIMIT, SimOptions, Trajectory, run_sim, sample_times};
pub use topology::{InteractionTemplate, RandomInteractions};
