use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vehicle_co2_lca::catalog::SMALL_PETROL_CAR;
use vehicle_co2_lca::fleet::{percent_change, project};
use vehicle_co2_lca::report::{summarize, to_json, write_csv, write_summary};
use vehicle_co2_lca::{evaluate_all, reference_scenarios, single_vehicle_scenarios, AnalysisConfig};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compare cumulative CO2 of switching from a petrol car to other vehicles."
)]
struct Cli {
    /// JSON analysis config; reference values are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Analysis::Switch)]
    analysis: Analysis,

    #[arg(long, value_enum, default_value_t = Format::Summary)]
    format: Format,

    /// Scenario to compare against (overrides the config).
    #[arg(long)]
    reference: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Analysis {
    /// Drive the petrol car, then switch to another vehicle.
    Switch,
    /// Each reference vehicle alone over the whole vehicle life.
    Vehicles,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Summary,
    Csv,
    Json,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    match (cli.reference, cli.analysis) {
        (Some(reference), _) => cfg.reference_scenario = reference,
        (None, Analysis::Vehicles) => cfg.reference_scenario = SMALL_PETROL_CAR.to_string(),
        (None, Analysis::Switch) => {}
    }

    let scenarios = match cli.analysis {
        Analysis::Switch => reference_scenarios(&cfg.factors, &cfg.scenarios)?,
        Analysis::Vehicles => single_vehicle_scenarios(&cfg.factors, &cfg.scenarios)?,
    };
    let results = evaluate_all(&scenarios)?;
    for r in &results {
        info!(
            scenario = %r.name,
            terminal_co2_kg = r.trajectory.terminal_co2_kg(),
            "scenario evaluated"
        );
    }

    let reports = summarize(&results, &cfg.reference_scenario)?;
    let stdout = io::stdout();
    match cli.format {
        Format::Csv => write_csv(stdout.lock(), &results)?,
        Format::Json => println!("{}", to_json(&reports)?),
        Format::Summary => {
            write_summary(stdout.lock(), &reports)?;
            if cli.analysis != Analysis::Switch {
                return Ok(());
            }

            let baseline_gt = cfg.fleet.remaining_co2_gt();
            println!();
            println!("Remaining CO2 from the current fleet: {baseline_gt:.0} Gt");
            for r in reports.iter().filter(|r| r.name != cfg.reference_scenario) {
                println!(
                    "  if everyone chose {:<26} {:>5.0} Gt ({:+.0}%)",
                    format!("{}:", r.name),
                    project(baseline_gt, r.ratio_to_reference),
                    percent_change(r.ratio_to_reference)
                );
            }
        }
    }

    Ok(())
}
