//! Run a GDP scenario from the command line
//!
//! Loads the component table (bundled by default), applies per-component
//! adjustments, and prints or writes the projections and the reconstructed
//! aggregate.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gdp_scenario::projection::{ProjectionMethod, DEFAULT_UNIT_DIVISOR};
use gdp_scenario::scenario::{report, InvalidRatePolicy};
use gdp_scenario::series::{self, DEFAULT_AGGREGATE_COLUMN};
use gdp_scenario::{ScenarioConfig, ScenarioEngine, ScenarioParams};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    Deviation,
    Compound,
}

impl From<Method> for ProjectionMethod {
    fn from(m: Method) -> Self {
        match m {
            Method::Deviation => ProjectionMethod::DeviationScaling,
            Method::Compound => ProjectionMethod::CompoundGrowth,
        }
    }
}

#[derive(Debug, Parser)]
#[command(about = "Reconstruct GDP from adjusted expenditure components")]
struct Args {
    /// Wide CSV with a year column, the aggregate column and one column per component
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_AGGREGATE_COLUMN)]
    aggregate_column: String,

    /// Component adjustment, e.g. --adjust inv=20 (repeatable, -50..=50)
    #[arg(long = "adjust", value_name = "NAME=PCT", value_parser = ScenarioParams::parse_assignment)]
    adjustments: Vec<(String, f64)>,

    /// JSON file with {"adjustments": {...}}; --adjust entries override it
    #[arg(long)]
    params: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_UNIT_DIVISOR)]
    divisor: f64,

    #[arg(long, value_enum, default_value = "deviation")]
    method: Method,

    /// Fail when a component has no real growth rate instead of substituting 0
    #[arg(long)]
    strict: bool,

    /// Write components.csv and aggregate.csv here
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let dataset = match &args.input {
        Some(path) => series::load_dataset(path, &args.aggregate_column)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => series::default_dataset().context("Failed to load bundled dataset")?,
    };

    let mut params = match &args.params {
        Some(path) => ScenarioParams::from_json_file(path)
            .with_context(|| format!("Failed to read params {}", path.display()))?,
        None => ScenarioParams::new(),
    };
    for (name, pct) in &args.adjustments {
        params.set(name.clone(), *pct);
    }
    params.validate(&dataset).context("Invalid adjustments")?;

    let config = ScenarioConfig {
        unit_divisor: args.divisor,
        method: args.method.into(),
        invalid_rate: if args.strict {
            InvalidRatePolicy::Reject
        } else {
            InvalidRatePolicy::default()
        },
        ..Default::default()
    };
    let engine = ScenarioEngine::new(config);
    let result = engine.run(&dataset, &params).context("Scenario run failed")?;

    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let path = dir.join("components.csv");
        let file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        report::write_components_csv(&result, BufWriter::new(file))?;

        let path = dir.join("aggregate.csv");
        let file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        report::write_aggregate_csv(&result, BufWriter::new(file))?;

        eprintln!("Output written to {}", dir.display());
    }

    if args.json {
        report::write_json(&result, std::io::stdout().lock())?;
        println!();
        return Ok(());
    }

    println!("Components:");
    println!("{:<20} {:>8} {:>12}", "Name", "Adj %", "CAGR");
    for c in &result.components {
        let rate = c
            .baseline_rate
            .map(|r| format!("{:.4}", r))
            .unwrap_or_else(|| "n/a".to_string());
        println!("{:<20} {:>8.1} {:>12}", c.name, c.adjustment_pct, rate);
    }

    println!("\n{} (divisor {}):", result.aggregate_name, result.unit_divisor);
    println!("{:<6} {:>14} {:>14} {:>12} {:>8}", "Year", "Model", "Actual", "Diff", "Diff %");
    for row in &result.comparison.rows {
        let pct = row
            .relative_difference
            .map(|r| format!("{:.2}", r * 100.0))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "{:<6} {:>14.3} {:>14.3} {:>12.3} {:>8}",
            row.period, row.reconstructed, row.ground_truth, row.difference, pct
        );
    }

    println!("\nMean |diff|: {:.3}", result.comparison.mean_abs_difference());
    if let Some((period, diff)) = result.comparison.max_abs_difference() {
        println!("Max |diff|:  {:.3} in {}", diff, period);
    }
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
