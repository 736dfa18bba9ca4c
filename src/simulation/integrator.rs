//! Fixed-step velocity-Verlet integrator for the N-body system
//!
//! One call advances a snapshot by one tick:
//! 1. every acceleration `a_new` is computed from the unmodified snapshot
//! 2. only then are velocities and positions of a copy updated:
//!    - `v += 0.5 (a_new + a_old) dt`
//!    - `x += v_old dt + 0.5 a_old dt²`
//!
//! `a_old` is the acceleration stored on each body by the previous tick
//! (zero before the first). Position uses the pre-update velocity and
//! acceleration, not the ones just computed.

use log::trace;

use super::error::SimError;
use super::forces::AccelSet;
use super::params::Parameters;
use super::states::{NVec2, System};

/// Advance `prev` by one step of `params.h0` and return the new snapshot.
/// `prev` is never mutated; the result owns fresh copies of every body.
pub fn verlet_integrator(prev: &System, forces: &AccelSet, params: &Parameters) -> Result<System, SimError> {
    params.validate()?;
    let n = prev.bodies.len();

    let dt = params.h0; // time step dt
    let half_dt = 0.5 * dt; // half step dt/2

    // First pass: a_new[i] for every body, all read from the snapshot at the
    // start of the tick
    let mut a_new = vec![NVec2::zeros(); n];
    forces.accumulate_accels(prev, &mut a_new)?;

    // Second pass: integrate a copy, reading old state from `prev`
    let mut next = prev.clone();
    for ((b, old), a) in next.bodies.iter_mut().zip(prev.bodies.iter()).zip(a_new.iter()) {
        b.a = *a;

        // v_n+1 = v_n + dt/2 (a_n+1 + a_n)
        b.v = old.v + half_dt * (*a + old.a);

        // x_n+1 = x_n + dt v_n + dt²/2 a_n
        b.x = old.x + dt * old.v + half_dt * dt * old.a;
    }

    // Increment the system time by one full step
    next.t = prev.t + dt;

    trace!("advanced {} bodies to t = {}", n, next.t);

    Ok(next)
}
