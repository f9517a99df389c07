//! glv-scenario: YAML scenario format, validation and model construction.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_scenario};

use glv_core::GlvError;
use glv_sim::{GlvModel, InteractionTemplate, RandomInteractions, SimOptions, Trajectory};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub type ScenarioResult<T> = Result<T, ScenarioError>;

#[derive(thiserror::Error, Debug)]
pub enum ScenarioError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Model error: {0}")]
    Model(#[from] GlvError),
}

pub fn from_yaml_str(content: &str) -> ScenarioResult<Scenario> {
    let scenario: Scenario = serde_yaml::from_str(content)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn to_yaml_string(scenario: &Scenario) -> ScenarioResult<String> {
    validate_scenario(scenario)?;
    Ok(serde_yaml::to_string(scenario)?)
}

impl From<&RunDef> for SimOptions {
    fn from(run: &RunDef) -> Self {
        SimOptions {
            t_end: run.t_end,
            dt: run.dt,
            record_every: run.record_every,
            ..SimOptions::default()
        }
    }
}

/// Build a model holding the scenario's initial state and parameters.
pub fn build_model(scenario: &Scenario) -> ScenarioResult<GlvModel> {
    validate_scenario(scenario)?;

    let mut model = GlvModel::new(scenario.species)?;
    model.set_state(&scenario.state)?;
    model.set_rates(&scenario.rates)?;
    match &scenario.interactions {
        InteractionsDef::Dense { rows } => {
            model.set_matrix(rows)?;
        }
        InteractionsDef::Random {
            template,
            self_regulation,
            scale,
            seed,
        } => {
            let template = InteractionTemplate::from_rows(template)?;
            let sampler = RandomInteractions {
                self_regulation: *self_regulation,
                scale: *scale,
            };
            let mut rng = ChaCha8Rng::seed_from_u64(*seed);
            model.set_matrix_dense(&sampler.sample(&template, &mut rng))?;
        }
    }

    tracing::debug!(
        scenario = %scenario.name,
        species = scenario.species,
        "Built GLV model from scenario"
    );
    Ok(model)
}

/// Build the scenario's model and run it with the scenario's run settings.
pub fn run_scenario(scenario: &Scenario) -> ScenarioResult<Trajectory> {
    let mut model = build_model(scenario)?;
    Ok(model.simulate_with(&SimOptions::from(&scenario.run))?)
}
