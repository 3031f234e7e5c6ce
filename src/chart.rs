//! Chart geometry and SVG output
//!
//! Maps the two cost series onto a padded canvas: x is linear in the day
//! index, y is linear in cost with `[0, max_cost]` spanning the plot height.

use crate::projection::ProjectionResult;
use crate::report::format_thousands;
use crate::schedule::SeriesLabels;
use std::fmt;

pub const BASELINE_COLOR: &str = "#59e09d";
pub const ALTERNATIVE_COLOR: &str = "#aa00ff";

const GRID_COLOR: &str = "#eee";
const AXIS_COLOR: &str = "#aaa";
const TEXT_COLOR: &str = "#555";

/// Number of horizontal gridlines, including the x-axis
const GRIDLINES: usize = 5;

/// Days that get a vertical gridline and labelled markers
const MARKER_EVERY: usize = 10;

const LEGEND_TOP: f64 = 8.0;
const LEGEND_ROW: f64 = 18.0;
const LEGEND_SWATCH: f64 = 12.0;

/// Horizontal gridline with its cost label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gridline {
    pub y: f64,
    pub value: f64,
}

/// Canvas size and padding in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 300.0,
            padding: 50.0,
        }
    }
}

impl ChartGeometry {
    /// x pixel for a 0-based point index out of `points`
    pub fn x(&self, index: usize, points: usize) -> f64 {
        if points < 2 {
            return self.padding;
        }
        let step = (self.width - 2.0 * self.padding) / (points - 1) as f64;
        self.padding + index as f64 * step
    }

    /// y pixel for a cost; an all-zero chart sits on the x-axis
    pub fn y(&self, value: f64, max: f64) -> f64 {
        let bottom = self.height - self.padding;
        if max <= 0.0 {
            return bottom;
        }
        bottom - (value / max) * (self.height - 2.0 * self.padding)
    }

    /// SVG path data (`M x,y L x,y ...`) for one series
    pub fn line_path(&self, values: &[f64], max: f64) -> String {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let cmd = if i == 0 { 'M' } else { 'L' };
                format!("{}{},{}", cmd, self.x(i, values.len()), self.y(value, max))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Evenly spaced gridlines from the top (max) to the x-axis (0)
    pub fn gridlines(&self, max: f64) -> Vec<Gridline> {
        let spacing = (self.height - 2.0 * self.padding) / (GRIDLINES - 1) as f64;
        (0..GRIDLINES)
            .map(|i| Gridline {
                y: self.padding + i as f64 * spacing,
                value: (GRIDLINES - 1 - i) as f64 / (GRIDLINES - 1) as f64 * max,
            })
            .collect()
    }

    /// 0-based indices of marked days (10, 20, 30)
    pub fn marker_indices(&self, points: usize) -> Vec<usize> {
        (0..points).filter(|i| (i + 1) % MARKER_EVERY == 0).collect()
    }

    /// Render both series as a standalone SVG document
    pub fn render_svg(&self, result: &ProjectionResult, labels: &SeriesLabels, unit_price_usd: f64) -> String {
        SvgChart {
            geometry: self,
            result,
            labels,
            unit_price_usd,
        }
        .to_string()
    }
}

/// One projection drawn on a geometry; `Display` writes the SVG document
pub struct SvgChart<'a> {
    pub geometry: &'a ChartGeometry,
    pub result: &'a ProjectionResult,
    pub labels: &'a SeriesLabels,
    pub unit_price_usd: f64,
}

impl fmt::Display for SvgChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = self.geometry;
        let max = self.result.max_cost();
        let baseline = self.result.baseline.values();
        let alternative = self.result.alternative.values();
        let points = baseline.len();
        let p = g.padding;
        let bottom = g.height - g.padding;
        let right = g.width - g.padding;
        let series = [
            (baseline, BASELINE_COLOR, self.labels.baseline),
            (alternative, ALTERNATIVE_COLOR, self.labels.alternative),
        ];

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = g.width,
            h = g.height
        )?;

        for line in g.gridlines(max) {
            writeln!(
                f,
                r#"  <line x1="{p}" y1="{y}" x2="{right}" y2="{y}" stroke="{GRID_COLOR}" />"#,
                y = line.y
            )?;
            writeln!(
                f,
                r#"  <text x="{x}" y="{y}" text-anchor="end" font-size="12" fill="{TEXT_COLOR}">${label}</text>"#,
                x = p - 5.0,
                y = line.y + 4.0,
                label = format_thousands(line.value, 0)
            )?;
        }

        for idx in g.marker_indices(points) {
            let x = g.x(idx, points);
            writeln!(f, r#"  <line x1="{x}" y1="{p}" x2="{x}" y2="{bottom}" stroke="{GRID_COLOR}" />"#)?;
            writeln!(
                f,
                r#"  <text x="{x}" y="{y}" text-anchor="middle" font-size="12" fill="{TEXT_COLOR}">{day}</text>"#,
                y = bottom + 15.0,
                day = idx + 1
            )?;
            for (values, color, _) in series {
                let y = g.y(values[idx], max);
                writeln!(f, r#"  <circle cx="{x}" cy="{y}" r="3" fill="{color}" />"#)?;
                writeln!(
                    f,
                    r#"  <text x="{x}" y="{ty}" text-anchor="middle" font-size="14" fill="{color}">${label}</text>"#,
                    ty = y - 8.0,
                    label = format_thousands(values[idx], 2)
                )?;
            }
        }

        // Axes
        writeln!(f, r#"  <line x1="{p}" y1="{p}" x2="{p}" y2="{bottom}" stroke="{AXIS_COLOR}" />"#)?;
        writeln!(f, r#"  <line x1="{p}" y1="{bottom}" x2="{right}" y2="{bottom}" stroke="{AXIS_COLOR}" />"#)?;
        writeln!(
            f,
            r#"  <text x="{x}" y="{y}" text-anchor="middle" font-size="12" fill="{TEXT_COLOR}">Day</text>"#,
            x = g.width / 2.0,
            y = bottom + 40.0
        )?;

        for (values, color, label) in series {
            writeln!(
                f,
                r#"  <path d="{d}" stroke="{color}" stroke-width="2" fill="none"><title>{label}</title></path>"#,
                d = g.line_path(values, max)
            )?;
        }

        // Legend, one row per series in the top padding
        for (row, (_, color, label)) in series.iter().enumerate() {
            let y = LEGEND_TOP + row as f64 * LEGEND_ROW;
            writeln!(
                f,
                r#"  <rect x="{p}" y="{y}" width="{LEGEND_SWATCH}" height="{LEGEND_SWATCH}" fill="{color}" />"#
            )?;
            writeln!(
                f,
                r#"  <text x="{x}" y="{ty}" font-size="12" fill="{TEXT_COLOR}">{label}</text>"#,
                x = p + LEGEND_SWATCH + 6.0,
                ty = y + LEGEND_SWATCH - 2.0
            )?;
        }

        writeln!(
            f,
            r#"  <text x="{right}" y="{y}" text-anchor="end" font-size="11" fill="{TEXT_COLOR}">Price: ${price} USD/SOL</text>"#,
            y = g.height - 5.0,
            price = format_thousands(self.unit_price_usd, 2)
        )?;

        writeln!(f, "</svg>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ModeFlags, RateParameters};
    use crate::projection::compute;
    use crate::schedule::{FeeSchedule, Variant};
    use approx::assert_relative_eq;

    #[test]
    fn test_affine_transform_corners() {
        let geometry = ChartGeometry::default();
        assert_eq!(geometry.x(0, 30), 50.0);
        assert_relative_eq!(geometry.x(29, 30), 550.0, max_relative = 1e-12);
        assert_eq!(geometry.y(0.0, 100.0), 250.0);
        assert_eq!(geometry.y(100.0, 100.0), 50.0);
        assert_eq!(geometry.y(50.0, 100.0), 150.0);
    }

    #[test]
    fn test_zero_max_has_no_nan() {
        let geometry = ChartGeometry::default();
        assert_eq!(geometry.y(0.0, 0.0), 250.0);
        let path = geometry.line_path(&[0.0; 30], 0.0);
        assert!(!path.contains("NaN"));
        assert!(path.starts_with("M50,250 L"));
    }

    #[test]
    fn test_gridlines_top_to_bottom() {
        let lines = ChartGeometry::default().gridlines(400.0);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], Gridline { y: 50.0, value: 400.0 });
        assert_eq!(lines[2], Gridline { y: 150.0, value: 200.0 });
        assert_eq!(lines[4], Gridline { y: 250.0, value: 0.0 });
    }

    #[test]
    fn test_markers_every_ten_days() {
        assert_eq!(ChartGeometry::default().marker_indices(30), vec![9, 19, 29]);
    }

    #[test]
    fn test_svg_renders_degenerate_projection() {
        let params = RateParameters::new(1.0, 1.0, 1.0).with_mode(ModeFlags {
            dedicated: false,
            discounted: true,
        });
        let result = compute(&params, &FeeSchedule::vrf(), 200.0);
        let svg = ChartGeometry::default().render_svg(&result, &Variant::Vrf.labels(), 200.0);

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(!svg.contains("NaN"));
        assert_eq!(svg.matches("<path").count(), 2);
        assert_eq!(svg.matches("<circle").count(), 6);
    }

    #[test]
    fn test_svg_has_legend_and_price_note() {
        let labels = Variant::Standard.labels();
        let result = compute(&RateParameters::new(50.0, 30.0, 1.0), &FeeSchedule::standard(), 150.0);
        let svg = ChartGeometry::default().render_svg(&result, &labels, 150.0);

        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains(&format!(r#"<rect x="50" y="8" width="12" height="12" fill="{BASELINE_COLOR}" />"#)));
        assert!(svg.contains(&format!(r#"fill="{ALTERNATIVE_COLOR}" />"#)));
        assert!(svg.contains(&format!(">{}</text>", labels.baseline)));
        assert!(svg.contains(&format!(">{}</text>", labels.alternative)));
        assert!(svg.contains(">Price: $150 USD/SOL</text>"));
    }
}
