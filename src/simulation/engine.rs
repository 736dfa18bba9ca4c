//! Runtime engine settings and the simulation driver
//!
//! `Engine` selects Barnes–Hut or direct summation, the opening threshold
//! `theta` and the tree depth cap. [`run`] repeats
//! [`verlet_integrator`](super::integrator::verlet_integrator) and collects
//! every snapshot.

use log::{debug, info};

use super::barnes_hut::{validate_max_depth, DEFAULT_MAX_DEPTH};
use super::error::SimError;
use super::forces::{AccelSet, NewtonianGravity, NewtonianGravityBarnesHut};
use super::integrator::verlet_integrator;
use super::params::Parameters;
use super::states::System;

/// Default opening threshold when a scenario does not set one
pub const DEFAULT_THETA: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub barnes_hut: bool, // false = direct, true = barnes-hut
    pub theta: f64, // parameter to determine if use center of mass
    pub max_depth: usize, // quadtree recursion cap
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            barnes_hut: true,
            theta: DEFAULT_THETA,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Engine {
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.theta.is_finite() && self.theta >= 0.0) {
            return Err(SimError::InvalidTheta(self.theta));
        }
        validate_max_depth(self.max_depth)
    }

    /// Gravity term matching these settings
    pub fn gravity(&self, params: &Parameters) -> AccelSet {
        if self.barnes_hut {
            AccelSet::new().with(NewtonianGravityBarnesHut {
                G: params.G,
                eps2: params.eps2,
                theta: self.theta,
                max_depth: self.max_depth,
            })
        } else {
            AccelSet::new().with(NewtonianGravity {
                G: params.G,
                eps2: params.eps2,
            })
        }
    }
}

/// Run `params.num_ticks` steps from `initial`.
///
/// Returns `num_ticks + 1` snapshots; element 0 is a copy of `initial` and
/// each later one is integrated from its predecessor. No two snapshots share
/// body storage.
///
/// # Errors
/// Invalid parameters, force settings (theta, depth cap) or an invalid
/// initial snapshot fail before any tick runs. With a Barnes–Hut term, a body that drifts out of the root region
/// fails the following tick and with it the whole run.
pub fn run(initial: &System, forces: &AccelSet, params: &Parameters) -> Result<Vec<System>, SimError> {
    params.validate()?;
    forces.validate()?;
    initial.validate()?;

    info!(
        "running {} ticks of dt = {} over {} bodies",
        params.num_ticks,
        params.h0,
        initial.bodies.len()
    );

    let mut snapshots = Vec::with_capacity(params.num_ticks + 1);
    snapshots.push(initial.clone());

    for tick in 1..=params.num_ticks {
        let next = verlet_integrator(&snapshots[tick - 1], forces, params)?;
        debug!("tick {tick}: t = {}", next.t);
        snapshots.push(next);
    }

    info!("finished at t = {}", snapshots[snapshots.len() - 1].t);

    Ok(snapshots)
}
