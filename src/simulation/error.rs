//! Configuration errors raised before a tick starts.
//!
//! Numerical edge cases (coincident bodies, a body sitting on an aggregate
//! center of mass) are not errors; they contribute zero force.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("system has no bodies")]
    EmptySystem,

    #[error("universe width must be positive and finite, got {0}")]
    NonPositiveWidth(f64),

    #[error("time step must be non-negative and finite, got {0}")]
    NegativeTimeStep(f64),

    #[error("theta must be non-negative and finite, got {0}")]
    InvalidTheta(f64),

    #[error("maximum tree depth must be between 1 and {max}, got {0}", max = crate::simulation::barnes_hut::MAX_TREE_DEPTH)]
    InvalidMaxDepth(usize),

    #[error("gravitational constant must be non-negative and finite, got {0}")]
    InvalidGravity(f64),

    #[error("softening eps2 must be non-negative and finite, got {0}")]
    InvalidSoftening(f64),

    #[error("body {index} has invalid mass {mass} (must be finite and >= 0)")]
    InvalidMass { index: usize, mass: f64 },

    #[error("body {index} has a non-finite position, velocity or acceleration")]
    NonFiniteState { index: usize },

    #[error("body {index} at ({x}, {y}) lies outside the root region [0, {width}) x [0, {width})")]
    BodyOutOfBounds { index: usize, x: f64, y: f64, width: f64 },

    #[error("acceleration buffer holds {got} entries for {expected} bodies")]
    BodyCountChanged { expected: usize, got: usize },
}
