//! Summary text, CSV and JSON output for projection results

use crate::error::Result;
use crate::projection::{CheaperSeries, ProjectionResult};
use crate::schedule::{HeadlineStream, SeriesLabels};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Format with thousands separators and at most `max_decimals` decimals,
/// dropping trailing zeros (`129600.5` -> `"129,600.5"`)
pub fn format_thousands(value: f64, max_decimals: usize) -> String {
    let formatted = format!("{:.*}", max_decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac)) => (int_part, frac.trim_end_matches('0')),
        None => (formatted.as_str(), ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

/// Human-readable summary of one projection
pub fn summary_lines(result: &ProjectionResult, labels: &SeriesLabels) -> Vec<String> {
    let headline_total = match labels.headline_stream {
        HeadlineStream::Primary => result.total_primary_events,
        HeadlineStream::SecondaryA => result.total_secondary_events_a,
    };

    let mut lines = vec![
        format!(
            "{}M {} over 30 days.",
            format_thousands(headline_total / 1_000_000.0, 2),
            labels.headline_noun
        ),
        format!("{}: ${}", labels.baseline, format_thousands(result.final_baseline(), 2)),
        format!("{}: ${}", labels.alternative, format_thousands(result.final_alternative(), 2)),
    ];

    let verdict = match result.comparison {
        Some(cmp) if cmp.cheaper == CheaperSeries::Alternative => format!(
            "You save ${}, or {}x cheaper.",
            format_thousands(result.savings, 2),
            format_thousands(cmp.ratio, 2)
        ),
        Some(cmp) if cmp.cheaper == CheaperSeries::Baseline => format!(
            "{} is {}x more expensive. Try lowering the batched event rates to get a cost advantage.",
            labels.alternative,
            format_thousands(cmp.ratio, 2)
        ),
        Some(_) => "Both models cost the same.".to_string(),
        None if result.savings > 0.0 => format!(
            "You save ${} (ratio not applicable: {} costs nothing).",
            format_thousands(result.savings, 2),
            labels.alternative
        ),
        None => "Cost ratio not applicable.".to_string(),
    };
    lines.push(verdict);

    if let Some(rate) = result.breakeven_primary_rate {
        lines.push(format!(
            "Break-even at {} primary events/sec.",
            format_thousands(rate, 2)
        ));
    }

    lines
}

/// Write one CSV row per day
pub fn write_daily_csv<W: Write>(writer: W, result: &ProjectionResult) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in result.rows() {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Serializable bundle written by `--json`
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub schedule: &'a str,
    pub unit_price_usd: f64,
    pub labels: &'a SeriesLabels,
    pub result: &'a ProjectionResult,
}

impl<'a> ProjectionReport<'a> {
    pub fn new(schedule: &'a str, unit_price_usd: f64, labels: &'a SeriesLabels, result: &'a ProjectionResult) -> Self {
        Self {
            generated_at: Utc::now(),
            schedule,
            unit_price_usd,
            labels,
            result,
        }
    }
}
