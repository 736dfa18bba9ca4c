//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - number of ticks and the fixed step size,
//! - gravitational constant `G`, passed explicitly so different unit systems
//!   can be run side by side,
//! - optional softening `eps2`

use crate::simulation::error::SimError;

/// Gravitational constant in SI units (m³ kg⁻¹ s⁻²)
pub const G_SI: f64 = 6.67408e-11;

/// One solar mass in kg
pub const SOLAR_MASS: f64 = 1.989e30;

#[derive(Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct Parameters {
    pub num_ticks: usize, // number of steps to run
    pub h0: f64, // step size
    pub eps2: f64, // softening, 0 for the plain inverse-square law
    pub G: f64, // gravitational constant
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            num_ticks: 0,
            h0: 1.0,
            eps2: 0.0,
            G: G_SI,
        }
    }
}

impl Parameters {
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.h0.is_finite() && self.h0 >= 0.0) {
            return Err(SimError::NegativeTimeStep(self.h0));
        }
        if !(self.G.is_finite() && self.G >= 0.0) {
            return Err(SimError::InvalidGravity(self.G));
        }
        if !(self.eps2.is_finite() && self.eps2 >= 0.0) {
            return Err(SimError::InvalidSoftening(self.eps2));
        }
        Ok(())
    }
}
