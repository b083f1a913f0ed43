//! Thin CLI front-end over the scheduling core: read a Scenario payload,
//! run the requested solver, print the schedule and KPI map as JSON.
//! No HTTP surface, no persistence — both are out of scope for the core.

use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use trainsched::io::{ScenarioPayload, SolverSelection};
use trainsched::kpi;

#[derive(Parser, Debug)]
#[command(name = "scheduled_cli", about = "Run a train scheduling scenario")]
struct Args {
    /// Path to a Scenario JSON payload; reads stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "greedy")]
    solver: SolverArg,

    #[arg(long, default_value_t = 0)]
    otp_tolerance: u64,

    #[arg(long)]
    milp_time_limit: Option<u64>,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum SolverArg {
    Greedy,
    Mip,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let raw = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let payload: ScenarioPayload = serde_json::from_str(&raw)?;
    let (network, trains) = payload.into_domain()?;

    let mode = match args.solver {
        SolverArg::Greedy => SolverSelection::Greedy,
        SolverArg::Mip => SolverSelection::Mip,
    }
    .into();

    let schedule = trainsched::schedule(&trains, &network, mode, args.milp_time_limit)?;
    let kpis = kpi::compute(&schedule, &trains, args.otp_tolerance);

    let output = serde_json::json!({
        "schedule": schedule,
        "kpis": kpis,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
