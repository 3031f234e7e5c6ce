//! Fee Simulator CLI
//!
//! Runs one 30-day projection and prints the summary

use anyhow::{Context, Result};
use clap::Parser;
use fee_simulator::{
    chart::ChartGeometry,
    report::{self, ProjectionReport},
    schedule::loader,
    ModeFlags, ParameterController, ScenarioRunner, Variant,
};
use std::fs::{self, File};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fee_simulator", version, about = "30-day fee cost projection")]
struct Args {
    /// Simulator deployment
    #[arg(long, value_enum, default_value_t = Variant::Standard)]
    variant: Variant,

    /// Fee schedule CSV overriding the variant's built-in fees
    #[arg(long)]
    schedule: Option<PathBuf>,

    /// Primary events (transactions) per second
    #[arg(long)]
    tps: Option<f64>,

    /// Secondary stream A events per minute (commits, VRF requests)
    #[arg(long)]
    cpm: Option<f64>,

    /// Secondary stream B events per minute (delegation sessions)
    #[arg(long)]
    dpm: Option<f64>,

    /// Dedicated node (adds the per-transaction surcharge)
    #[arg(long)]
    dedicated: bool,

    /// Discounted alternative fees (e.g. VRF from inside an ER)
    #[arg(long)]
    discounted: bool,

    /// Unit price in USD, overriding the schedule's
    #[arg(long)]
    price: Option<f64>,

    /// Clamp rates into their valid domain instead of rejecting them
    #[arg(long)]
    clamp: bool,

    /// Write daily rows as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the full result as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the chart as SVG
    #[arg(long)]
    svg: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let variant = args.variant;
    let mut schedule = match &args.schedule {
        Some(path) => loader::load_schedule(path)
            .with_context(|| format!("loading fee schedule {}", path.display()))?,
        None => variant.fee_schedule(),
    };
    if let Some(price) = args.price {
        schedule = schedule.with_unit_price(price).context("invalid --price")?;
    }

    let defaults = variant.default_params();
    let mode = ModeFlags {
        dedicated: args.dedicated,
        discounted: args.discounted,
    };

    let params = if args.clamp {
        // Apply the user's values in slider order so each change is re-checked
        let mut controller = ParameterController::new(variant.bounds(), defaults.with_mode(mode))?;
        if let Some(tps) = args.tps {
            controller.set_primary_rate(tps);
        }
        if let Some(cpm) = args.cpm {
            controller.set_secondary_rate_a(cpm);
        }
        if let Some(dpm) = args.dpm {
            controller.set_secondary_rate_b(dpm);
        }
        controller.params()
    } else {
        let mut params = defaults.with_mode(mode);
        params.primary_rate = args.tps.unwrap_or(params.primary_rate);
        params.secondary_rate_a = args.cpm.unwrap_or(params.secondary_rate_a);
        params.secondary_rate_b = args.dpm.unwrap_or(params.secondary_rate_b);
        params
    };

    let runner = ScenarioRunner::new(schedule, variant.bounds())?;
    let result = runner
        .run(&params)
        .context("rates rejected (pass --clamp to adjust them automatically)")?;
    let labels = variant.labels();

    println!("Fee Simulator v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");
    println!("Schedule: {} ({} USD per fee unit)", runner.schedule().name(), runner.schedule().unit_price_usd());
    println!(
        "Rates: {} /sec primary, {} /min A, {} /min B{}{}",
        params.primary_rate,
        params.secondary_rate_a,
        params.secondary_rate_b,
        if params.mode.dedicated { ", dedicated" } else { "" },
        if params.mode.discounted { ", discounted" } else { "" },
    );
    println!();

    println!("{:>5} {:>16} {:>16}", "Day", labels.baseline, labels.alternative);
    println!("{}", "-".repeat(39));
    for row in result.rows().iter().filter(|r| r.day % 10 == 0) {
        println!(
            "{:>5} {:>16} {:>16}",
            row.day,
            format!("${}", report::format_thousands(row.baseline, 2)),
            format!("${}", report::format_thousands(row.alternative, 2)),
        );
    }
    println!();

    for line in report::summary_lines(&result, &labels) {
        println!("{}", line);
    }

    if let Some(path) = &args.csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        report::write_daily_csv(file, &result)?;
        println!("\nDaily rows written to: {}", path.display());
    }

    if let Some(path) = &args.json {
        let report = ProjectionReport::new(
            runner.schedule().name(),
            runner.schedule().unit_price_usd(),
            &labels,
            &result,
        );
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &report)?;
        println!("JSON report written to: {}", path.display());
    }

    if let Some(path) = &args.svg {
        let svg = ChartGeometry::default().render_svg(&result, &labels, runner.schedule().unit_price_usd());
        fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
        println!("Chart written to: {}", path.display());
    }

    Ok(())
}
