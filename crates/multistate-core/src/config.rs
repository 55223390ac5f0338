//! Scenario Configuration
//!
//! Loads a model and cohort description from a TOML scenario file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::setup::TransitionMatrix;
use crate::systems::SimulationOptions;
use crate::transition::TransitionSpec;

/// A complete scenario: run settings, the model and the cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Seed and time scale
    #[serde(default)]
    pub simulation: SimulationOptions,
    pub model: ModelConfig,
    pub cohort: CohortConfig,
}

/// The multi-state model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Square adjacency matrix; nonzero cells are transitions
    pub matrix: TransitionMatrix,
    /// One spec per nonzero cell, in row-major order
    #[serde(default)]
    pub transitions: Vec<TransitionSpec>,
}

/// The individuals to simulate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortConfig {
    /// One row per individual; intercept-only when omitted
    #[serde(default)]
    pub attributes: Option<Vec<Vec<f64>>>,
    /// Entry time of each individual, indexed by individual id
    pub entry_times: Vec<f64>,
}

impl ScenarioConfig {
    /// Loads a scenario from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parses a scenario from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.simulation.seed = seed;
        self
    }
}

/// Errors reading a scenario file.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}
