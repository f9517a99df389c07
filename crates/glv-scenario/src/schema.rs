//! Scenario schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub species: usize,
    /// Initial abundances
    pub state: Vec<f64>,
    /// Intrinsic growth rates
    pub rates: Vec<f64>,
    pub interactions: InteractionsDef,
    pub run: RunDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum InteractionsDef {
    /// Explicit matrix, one row per affected species.
    Dense { rows: Vec<Vec<f64>> },
    /// Matrix sampled over a 0/1 topology with a fixed seed.
    Random {
        template: Vec<Vec<u8>>,
        #[serde(default = "default_self_regulation")]
        self_regulation: f64,
        #[serde(default = "default_scale")]
        scale: f64,
        seed: u64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunDef {
    pub t_end: f64,
    pub dt: f64,
    #[serde(default = "default_record_every")]
    pub record_every: usize,
}

fn default_self_regulation() -> f64 {
    -1.0
}

fn default_scale() -> f64 {
    -1.0
}

fn default_record_every() -> usize {
    1
}
