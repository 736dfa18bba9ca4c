//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde` representation of a simulation
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – Barnes–Hut vs direct summation, theta, depth cap
//! - [`ParametersConfig`] – tick count, step size and physical constants
//! - `width`              – side of the root square `[0, width)²`
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario matching these types:
//!
//! ```yaml
//! engine:
//!   barnes_hut: true
//!   theta: 0.5              # optional, defaults to 0.5
//!   max_depth: 48           # optional, defaults to 48
//!
//! parameters:
//!   num_ticks: 100          # number of steps
//!   h0: 1000.0              # step size
//!   G: 6.67408e-11          # gravitational constant
//!   eps2: 0.0               # optional softening, defaults to 0
//!
//! width: 1.0e12
//!
//! bodies:
//!   - x: [ 5.0e11, 5.0e11 ]
//!     v: [ 0.0, 0.0 ]
//!     m: 1.989e30
//!     radius: 7.0e8
//!     color: [ 255, 220, 0 ]
//! ```
//!
//! [`ScenarioConfig`] also serializes, so a snapshot can be written back out
//! with [`ScenarioConfig::from_system`] and loaded again later.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::simulation::barnes_hut::DEFAULT_MAX_DEPTH;
use crate::simulation::engine::{Engine, DEFAULT_THETA};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, Color, NVec2, System};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("body {index}: `{field}` must have 2 components, got {len}")]
    BadVector { field: &'static str, index: usize, len: usize },
}

fn default_theta() -> f64 {
    DEFAULT_THETA
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// High-level engine configuration
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub barnes_hut: bool, // `true` - forces are approximated using a quadtree, `false` - direct N^2 summation
    #[serde(default = "default_theta")]
    pub theta: f64, // side / distance threshold below which a node's COM is used instead of its children
    #[serde(default = "default_max_depth")]
    pub max_depth: usize, // recursion cap for coincident bodies
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct ParametersConfig {
    pub num_ticks: usize, // number of steps
    pub h0: f64, // time step size
    pub G: f64, // gravitational constant
    #[serde(default)]
    pub eps2: f64, // softening
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub x: Vec<f64>, // Initial position
    pub v: Vec<f64>, // Initial velocity
    pub m: f64, // Mass of the body
    #[serde(default)]
    pub radius: f64, // Display radius
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[u8; 3]>, // Display color, white when absent
}

impl BodyConfig {
    fn to_body(&self, index: usize) -> Result<Body, ConfigError> {
        let x = vec2("x", index, &self.x)?;
        let v = vec2("v", index, &self.v)?;
        let color = self
            .color
            .map(|[r, g, b]| Color::new(r, g, b))
            .unwrap_or_default();

        Ok(Body::new(x, v, self.m).with_radius(self.radius).with_color(color))
    }

    fn from_body(b: &Body) -> Self {
        Self {
            x: vec![b.x.x, b.x.y],
            v: vec![b.v.x, b.v.y],
            m: b.m,
            radius: b.radius,
            color: Some([b.color.r, b.color.g, b.color.b]),
        }
    }
}

fn vec2(field: &'static str, index: usize, c: &[f64]) -> Result<NVec2, ConfigError> {
    match c {
        [x, y] => Ok(NVec2::new(*x, *y)),
        _ => Err(ConfigError::BadVector { field, index, len: c.len() }),
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // Engine-level configuration
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    pub width: f64, // Side of the root square
    pub bodies: Vec<BodyConfig>, // List of bodies that define the initial state of the system
}

impl ScenarioConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Runtime snapshot at `t = 0` with zero stored accelerations
    pub fn system(&self) -> Result<System, ConfigError> {
        let bodies = self
            .bodies
            .iter()
            .enumerate()
            .map(|(i, bc)| bc.to_body(i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(System::new(bodies, self.width))
    }

    pub fn engine(&self) -> Engine {
        Engine {
            barnes_hut: self.engine.barnes_hut,
            theta: self.engine.theta,
            max_depth: self.engine.max_depth,
        }
    }

    pub fn parameters(&self) -> Parameters {
        Parameters {
            num_ticks: self.parameters.num_ticks,
            h0: self.parameters.h0,
            eps2: self.parameters.eps2,
            G: self.parameters.G,
        }
    }

    /// Scenario that restarts from `sys` with the given settings.
    /// Stored accelerations are not part of the format and restart at zero.
    pub fn from_system(sys: &System, engine: &Engine, params: &Parameters) -> Self {
        Self {
            engine: EngineConfig {
                barnes_hut: engine.barnes_hut,
                theta: engine.theta,
                max_depth: engine.max_depth,
            },
            parameters: ParametersConfig {
                num_ticks: params.num_ticks,
                h0: params.h0,
                G: params.G,
                eps2: params.eps2,
            },
            width: sys.width,
            bodies: sys.bodies.iter().map(BodyConfig::from_body).collect(),
        }
    }
}
