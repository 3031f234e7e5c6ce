//! Sweep the primary rate across a range and tabulate both models
//!
//! Outputs one CSV row per primary rate for crossover analysis

use anyhow::{Context, Result};
use clap::Parser;
use fee_simulator::{projection::CheaperSeries, ModeFlags, ScenarioRunner, Variant};
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "sweep", about = "Project a range of primary rates in parallel")]
struct Args {
    #[arg(long, value_enum, default_value_t = Variant::Standard)]
    variant: Variant,

    /// First primary rate
    #[arg(long, default_value_t = 1.0)]
    from: f64,

    /// Last primary rate (inclusive)
    #[arg(long, default_value_t = 100.0)]
    to: f64,

    #[arg(long, default_value_t = 1.0)]
    step: f64,

    #[arg(long)]
    cpm: Option<f64>,

    #[arg(long)]
    dpm: Option<f64>,

    #[arg(long)]
    dedicated: bool,

    #[arg(long)]
    discounted: bool,

    #[arg(long, default_value = "sweep_output.csv")]
    out: String,
}

#[derive(Debug, Serialize)]
struct SweepRow {
    primary_rate: f64,
    secondary_rate_a: f64,
    secondary_rate_b: f64,
    baseline_day_30: f64,
    alternative_day_30: f64,
    savings: f64,
    ratio: Option<f64>,
    cheaper: Option<CheaperSeries>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let runner = ScenarioRunner::for_variant(args.variant)?;

    let mut base = args.variant.default_params().with_mode(ModeFlags {
        dedicated: args.dedicated,
        discounted: args.discounted,
    });
    base.secondary_rate_a = args.cpm.unwrap_or(base.secondary_rate_a);
    base.secondary_rate_b = args.dpm.unwrap_or(base.secondary_rate_b);

    let rates = runner
        .primary_grid(args.from, args.to, args.step)
        .context("invalid --from/--to/--step")?;

    println!("Running {} projections for variant {}...", rates.len(), args.variant.name());
    let results = runner.sweep_primary(&base, &rates)?;

    let mut writer = csv::Writer::from_path(&args.out).with_context(|| format!("creating {}", args.out))?;
    let mut crossover = None;
    for result in &results {
        let cheaper = result.comparison.map(|c| c.cheaper);
        if crossover.is_none() && cheaper == Some(CheaperSeries::Alternative) {
            crossover = Some(result.params.primary_rate);
        }
        writer.serialize(SweepRow {
            primary_rate: result.params.primary_rate,
            secondary_rate_a: result.params.secondary_rate_a,
            secondary_rate_b: result.params.secondary_rate_b,
            baseline_day_30: result.final_baseline(),
            alternative_day_30: result.final_alternative(),
            savings: result.savings,
            ratio: result.comparison.map(|c| c.ratio),
            cheaper,
        })?;
    }
    writer.flush()?;

    println!("Output written to {}", args.out);
    match crossover {
        Some(rate) => println!("Alternative is cheaper from {} primary events/sec", rate),
        None => println!("Alternative is never cheaper in this range"),
    }
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
