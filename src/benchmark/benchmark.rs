use std::time::Instant;

use crate::simulation::barnes_hut::DEFAULT_MAX_DEPTH;
use crate::simulation::engine::run;
use crate::simulation::error::SimError;
use crate::simulation::forces::{AccelSet, Acceleration, NewtonianGravity, NewtonianGravityBarnesHut};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, System};

const WIDTH: f64 = 20.0;

/// Helper to build a manual System of size `n`, all bodies inside [0, WIDTH)²
pub fn make_system(n: usize) -> System {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec2::new(
            0.5 * WIDTH + (i_f * 0.37).sin() * 5.0,
            0.5 * WIDTH + (i_f * 0.13).cos() * 5.0,
        );
        bodies.push(Body::new(x, NVec2::zeros(), 1.0).with_radius(0.01));
    }

    System::new(bodies, WIDTH)
}

fn make_params(num_ticks: usize) -> Parameters {
    Parameters {
        num_ticks,
        h0: 0.001,
        eps2: 1e-4,
        G: 0.1,
    }
}

/// Time one direct and one Barnes–Hut acceleration evaluation per system size
pub fn bench_gravity(theta: f64) -> Result<(), SimError> {
    // Different system sizes to test
    let ns = [200, 400, 800, 1600, 3200, 6400];

    for n in ns {
        let sys = make_system(n);
        let params = make_params(0);
        let mut out = vec![NVec2::zeros(); n];

        let direct = NewtonianGravity {
            G: params.G,
            eps2: params.eps2,
        };
        let bh = NewtonianGravityBarnesHut {
            G: params.G,
            eps2: params.eps2,
            theta,
            max_depth: DEFAULT_MAX_DEPTH,
        };

        // Warm up
        direct.acceleration(&sys, &mut out)?;
        bh.acceleration(&sys, &mut out)?;

        let t0 = Instant::now();
        direct.acceleration(&sys, &mut out)?;
        let dt_direct = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        bh.acceleration(&sys, &mut out)?;
        let dt_bh = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, direct = {:8.6} s, BH = {:8.6} s", dt_direct, dt_bh);
    }
    Ok(())
}

/// Time whole runs of `steps` ticks, direct vs Barnes–Hut
pub fn bench_run(theta: f64, steps: usize) -> Result<(), SimError> {
    let ns = [200, 400, 800, 1600, 3200];

    for n in ns {
        let sys = make_system(n);
        let params = make_params(steps);

        let direct = AccelSet::new().with(NewtonianGravity {
            G: params.G,
            eps2: params.eps2,
        });
        let bh = AccelSet::new().with(NewtonianGravityBarnesHut {
            G: params.G,
            eps2: params.eps2,
            theta,
            max_depth: DEFAULT_MAX_DEPTH,
        });

        let t0 = Instant::now();
        run(&sys, &direct, &params)?;
        let direct_per_step = t0.elapsed().as_secs_f64() / steps.max(1) as f64;

        let t1 = Instant::now();
        run(&sys, &bh, &params)?;
        let bh_per_step = t1.elapsed().as_secs_f64() / steps.max(1) as f64;

        println!("N = {:5}, direct step = {:8.6} s,   BH step = {:8.6} s", n, direct_per_step, bh_per_step);
    }
    Ok(())
}
