//! Core state types for the 2D N-body simulation.
//!
//! - `Body`   a point mass with position, velocity, last acceleration and
//!   display-only radius/color
//! - `System` one snapshot of the universe: the ordered bodies, the side
//!   length of the bounding square and the elapsed time `t`
//!
//! Body order is the body's identity across snapshots. A `System` owns its
//! bodies outright, so cloning a snapshot never shares storage.

use nalgebra::Vector2;

use crate::simulation::error::SimError;
use crate::simulation::region::Region;

pub type NVec2 = Vector2<f64>;

/// RGB color carried through the simulation for display, ignored by physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub a: NVec2, // acceleration from the previous tick (zero before the first)
    pub m: f64, // mass
    pub radius: f64, // display radius
    pub color: Color,
}

impl Body {
    /// Body at rest with zero stored acceleration
    pub fn new(x: NVec2, v: NVec2, m: f64) -> Self {
        Self {
            x,
            v,
            a: NVec2::zeros(),
            m,
            radius: 0.0,
            color: Color::WHITE,
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct System {
    pub bodies: Vec<Body>, // 2d collection of bodies
    pub width: f64, // side length of the bounding square [0, width) x [0, width)
    pub t: f64, // time
}

impl System {
    pub fn new(bodies: Vec<Body>, width: f64) -> Self {
        Self { bodies, width, t: 0.0 }
    }

    /// Root region of the quadtree: the square with lower-left corner at the
    /// origin and side `width`
    pub fn region(&self) -> Region {
        Region::new(NVec2::zeros(), self.width)
    }

    /// Check everything tree construction relies on:
    /// at least one body, a positive width, finite state, non-negative masses
    /// and every body inside `region()`
    pub fn validate(&self) -> Result<(), SimError> {
        if self.bodies.is_empty() {
            return Err(SimError::EmptySystem);
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(SimError::NonPositiveWidth(self.width));
        }

        let region = self.region();
        for (index, b) in self.bodies.iter().enumerate() {
            let finite = b.x.iter().chain(b.v.iter()).chain(b.a.iter()).all(|c| c.is_finite());
            if !finite {
                return Err(SimError::NonFiniteState { index });
            }
            if !(b.m.is_finite() && b.m >= 0.0) {
                return Err(SimError::InvalidMass { index, mass: b.m });
            }
            if !region.contains(&b.x) {
                return Err(SimError::BodyOutOfBounds {
                    index,
                    x: b.x.x,
                    y: b.x.y,
                    width: self.width,
                });
            }
        }
        Ok(())
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.m).sum()
    }

    /// Mass-weighted centroid of all bodies, the origin if the total mass is zero
    pub fn center_of_mass(&self) -> NVec2 {
        center_of_mass(self.bodies.iter().map(|b| (b.x, b.m)))
    }

    pub fn momentum(&self) -> NVec2 {
        self.bodies.iter().fold(NVec2::zeros(), |p, b| p + b.v * b.m)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| 0.5 * b.m * b.v.norm_squared()).sum()
    }

    /// Newtonian potential energy summed over every unordered pair.
    /// Coincident pairs are skipped, matching the zero-force convention.
    #[allow(non_snake_case)]
    pub fn potential_energy(&self, G: f64) -> f64 {
        let mut u = 0.0;
        for (i, bi) in self.bodies.iter().enumerate() {
            for bj in &self.bodies[i + 1..] {
                let d = (bj.x - bi.x).norm();
                if d > 0.0 {
                    u -= G * bi.m * bj.m / d;
                }
            }
        }
        u
    }

    #[allow(non_snake_case)]
    pub fn total_energy(&self, G: f64) -> f64 {
        self.kinetic_energy() + self.potential_energy(G)
    }
}

/// Mass-weighted average of `(position, mass)` pairs.
/// Returns the origin when the total mass is zero so nothing divides by zero.
pub fn center_of_mass<I>(points: I) -> NVec2
where
    I: IntoIterator<Item = (NVec2, f64)>,
{
    let mut mass = 0.0;
    let mut weighted = NVec2::zeros();
    for (x, m) in points {
        mass += m;
        weighted += x * m;
    }
    if mass > 0.0 {
        weighted / mass
    } else {
        NVec2::zeros()
    }
}
