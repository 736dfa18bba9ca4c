//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - active force set (`AccelSet`)

use crate::configuration::config::{ConfigError, ScenarioConfig};
use crate::simulation::engine::{self, Engine};
use crate::simulation::error::SimError;
use crate::simulation::forces::AccelSet;
use crate::simulation::params::Parameters;
use crate::simulation::states::System;

/// A fully-initialized simulation: settings, initial state and the gravity
/// term chosen by `engine.barnes_hut`.
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: AccelSet,
}

impl Scenario {
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self, ConfigError> {
        let system = cfg.system()?;
        let engine = cfg.engine();
        let parameters = cfg.parameters();

        Ok(Self::new(engine, parameters, system))
    }

    pub fn new(engine: Engine, parameters: Parameters, system: System) -> Self {
        let forces = engine.gravity(&parameters);
        Self {
            engine,
            parameters,
            system,
            forces,
        }
    }

    /// Check every setting and the initial snapshot without running anything
    pub fn validate(&self) -> Result<(), SimError> {
        self.engine.validate()?;
        self.parameters.validate()?;
        self.system.validate()
    }

    /// Run the scenario, returning `num_ticks + 1` snapshots
    pub fn run(&self) -> Result<Vec<System>, SimError> {
        self.engine.validate()?;
        engine::run(&self.system, &self.forces, &self.parameters)
    }
}
