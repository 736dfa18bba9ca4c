use bhsim2d::{bench_gravity, bench_run};
use bhsim2d::{Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "2D Barnes-Hut N-body simulator")]
struct Args {
    /// Scenario file, relative to the crate's `scenarios/` directory unless absolute
    #[arg(short, long, default_value = "two_body.yaml")]
    file_name: String,

    /// Override the scenario's tick count
    #[arg(long)]
    ticks: Option<usize>,

    /// Write the final snapshot here as a loadable scenario
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run the direct vs Barnes-Hut benchmark instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let given = PathBuf::from(file_name);
    let config_path = if given.is_absolute() {
        given
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    ScenarioConfig::from_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_gravity(0.5)?;
        bench_run(0.5, 5)?;
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(&scenario_cfg)?;
    if let Some(ticks) = args.ticks {
        scenario.parameters.num_ticks = ticks;
    }
    scenario.validate().context("invalid scenario")?;

    let snapshots = scenario.run()?;
    let first = &snapshots[0];
    let last = &snapshots[snapshots.len() - 1];

    let g = scenario.parameters.G;
    let e0 = first.total_energy(g);
    let e1 = last.total_energy(g);
    let drift = if e0 != 0.0 { (e1 - e0) / e0.abs() } else { e1 - e0 };
    info!(
        "{} snapshots, t = {:.6e}, energy drift {:.3e}, momentum ({:.6e}, {:.6e})",
        snapshots.len(),
        last.t,
        drift,
        last.momentum().x,
        last.momentum().y
    );

    if let Some(path) = args.output {
        let out = ScenarioConfig::from_system(last, &scenario.engine, &scenario.parameters);
        fs::write(&path, out.to_yaml_string()?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote final snapshot to {}", path.display());
    }

    Ok(())
}
