pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body, Color, System, NVec2};
pub use simulation::error::SimError;
pub use simulation::region::Region;
pub use simulation::barnes_hut::{QuadTree, Node, NodeKind};
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity, NewtonianGravityBarnesHut, pairwise_force};
pub use simulation::integrator::verlet_integrator;
pub use simulation::engine::{run, Engine};
pub use simulation::params::Parameters;
pub use simulation::scenario::Scenario;

pub use configuration::config::{ConfigError, EngineConfig, ParametersConfig, BodyConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_gravity, bench_run};
