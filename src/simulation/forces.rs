//! Force / acceleration contributors for the n-body engine
//!
//! Defines the acceleration trait, direct all-pairs Newtonian gravity and the
//! Barnes–Hut quadtree variant. Both use the same pair law:
//! `F = G m1 m2 / d²` along the line between the bodies, zero when `d == 0`.

use crate::simulation::barnes_hut::{validate_max_depth, QuadTree, DEFAULT_MAX_DEPTH};
use crate::simulation::error::SimError;
use crate::simulation::states::{NVec2, System};

/// Gravitational field at `pos` due to a point mass `m` at `src`:
/// `G m r / |r|³` with `r = src - pos`.
///
/// `eps2` is added to `|r|²` to soften close encounters (0 keeps the plain
/// inverse-square law). Coincident points return zero instead of a singularity.
#[allow(non_snake_case)]
pub fn pairwise_field(pos: NVec2, src: NVec2, m: f64, G: f64, eps2: f64) -> NVec2 {
    let r = src - pos;
    let r2 = r.norm_squared();
    if r2 == 0.0 {
        return NVec2::zeros();
    }

    let inv_r = (r2 + eps2).sqrt().recip();
    let inv_r3 = inv_r * inv_r * inv_r;

    G * m * inv_r3 * r
}

/// Force on body 1 (at `x1`, mass `m1`) from body 2; the force on body 2 is
/// its negation.
#[allow(non_snake_case)]
pub fn pairwise_force(x1: NVec2, m1: f64, x2: NVec2, m2: f64, G: f64, eps2: f64) -> NVec2 {
    m1 * pairwise_field(x1, x2, m2, G, eps2)
}

/// Collection of acceleration terms (gravity, drag, etc.)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Check the settings of every term without touching any snapshot
    pub fn validate(&self) -> Result<(), SimError> {
        self.terms.iter().try_for_each(|term| term.validate())
    }

    /// Compute total accelerations for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    /// - `sys` is only read, so every term sees the same positions
    pub fn accumulate_accels(&self, sys: &System, out: &mut [NVec2]) -> Result<(), SimError> {
        if out.len() != sys.bodies.len() {
            return Err(SimError::BodyCountChanged {
                expected: sys.bodies.len(),
                got: out.len(),
            });
        }
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        for term in &self.terms {
            term.acceleration(sys, out)?;
        }
        Ok(())
    }
}

/// Acceleration sources operating on a [`System`] snapshot.
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, sys: &System, out: &mut [NVec2]) -> Result<(), SimError>;

    /// Reject invalid settings before any tick runs
    fn validate(&self) -> Result<(), SimError> {
        Ok(())
    }
}

/// Direct O(N²) Newtonian gravity
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub eps2: f64, // softening
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, sys: &System, out: &mut [NVec2]) -> Result<(), SimError> {
        let n = sys.bodies.len();

        // Each unordered pair (i, j), i < j, is visited once and applied to
        // both bodies with opposite sign
        for i in 0..n {
            let bi = &sys.bodies[i];
            for j in (i + 1)..n {
                let bj = &sys.bodies[j];

                let r = bj.x - bi.x;
                let r2 = r.norm_squared();
                if r2 == 0.0 {
                    continue; // coincident pair, no force
                }

                let inv_r = (r2 + self.eps2).sqrt().recip();
                let coef = self.G * inv_r * inv_r * inv_r;

                out[i] += coef * bj.m * r;
                out[j] -= coef * bi.m * r;
            }
        }
        Ok(())
    }
}

/// Newtonian gravity evaluated via a Barnes–Hut quadtree.
/// The tree is rebuilt from `sys` on every call and dropped afterwards.
#[allow(non_snake_case)]
pub struct NewtonianGravityBarnesHut {
    pub G: f64,
    pub eps2: f64,
    pub theta: f64, // opening threshold on side / distance
    pub max_depth: usize,
}

impl NewtonianGravityBarnesHut {
    #[allow(non_snake_case)]
    pub fn new(G: f64, theta: f64) -> Self {
        Self {
            G,
            eps2: 0.0,
            theta,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Acceleration for NewtonianGravityBarnesHut {
    fn validate(&self) -> Result<(), SimError> {
        if !(self.theta.is_finite() && self.theta >= 0.0) {
            return Err(SimError::InvalidTheta(self.theta));
        }
        validate_max_depth(self.max_depth)
    }

    fn acceleration(&self, sys: &System, out: &mut [NVec2]) -> Result<(), SimError> {
        self.validate()?;
        let tree = QuadTree::build(sys, self.max_depth)?;
        for (i, a) in out.iter_mut().enumerate() {
            *a += tree.field_on_body(i, sys, self.G, self.eps2, self.theta);
        }
        Ok(())
    }
}
