//! Terminal presentation of predictions, trends, and the feature schema.
//!
//! Everything here consumes the core's result types and produces strings;
//! printing is left to `main`. The gauge and the markdown table reproduce
//! the layout the original dashboard used, so numbers stay comparable
//! across the two front-ends.

use serde::Serialize;

use vassago_core::{schema, FeatureKind, PredictionResult, TrendSeries};

/// Character width of the gauge band.
const GAUGE_WIDTH: usize = 48;

/// The note the training side attaches to its range table.
pub const SCALE_NOTE: &str = "Note: Inputs must match the scale used during model training.";

/// Machine-readable output for `--json` runs.
#[derive(Debug, Serialize)]
pub struct RunOutput<'a> {
    pub energy_wh: f64,
    pub log2_energy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<&'a TrendSeries>,
}

/// The headline result line, or a warning when the output is degenerate.
pub fn result_line(result: &PredictionResult) -> String {
    if result.is_degenerate() {
        format!(
            "warning: predicted energy is not finite (raw log2 = {})\n{SCALE_NOTE}",
            result.log2_energy
        )
    } else {
        format!("Predicted energy consumption: {:.2} Wh", result.energy_wh)
    }
}

/// Two-line terminal gauge in the dashboard's band layout.
///
/// The axis runs 0 to `max(1.5 x energy, 500)`; the filled bands mark
/// 0.5x, 1.0x and 1.5x of the prediction, and the caret sits under the
/// predicted value itself.
pub fn gauge_lines(energy_wh: f64) -> String {
    let axis_max = (energy_wh * 1.5).max(500.0);
    let chars_for = |bound: f64| ((bound / axis_max) * GAUGE_WIDTH as f64).round() as usize;

    let half = chars_for(energy_wh * 0.5);
    let full = chars_for(energy_wh);
    let upper = chars_for(energy_wh * 1.5);

    let mut band = String::with_capacity(GAUGE_WIDTH);
    for i in 0..GAUGE_WIDTH {
        band.push(if i < half {
            '░'
        } else if i < full {
            '▒'
        } else if i < upper {
            '▓'
        } else {
            ' '
        });
    }

    let pointer = full.min(GAUGE_WIDTH.saturating_sub(1));
    format!(
        "0 {band} {axis_max:.0}\n  {spaces}^ {energy_wh:.2} Wh",
        spaces = " ".repeat(pointer)
    )
}

/// Aligned hour/Wh table for the daily trend, with peak and degenerate
/// footnotes.
pub fn trend_table(series: &TrendSeries) -> String {
    let mut out = String::from("Hour    Energy (Wh)\n");
    for point in series.points() {
        out.push_str(&format!("{:>4}    {:>11.2}\n", point.hour, point.energy_wh));
    }
    if let Some(peak) = series.peak() {
        out.push_str(&format!(
            "\nPeak: {:.2} Wh at hour {}\n",
            peak.energy_wh, peak.hour
        ));
    }
    let degenerate = series.degenerate_hours();
    if !degenerate.is_empty() {
        let hours: Vec<String> = degenerate.iter().map(u8::to_string).collect();
        out.push_str(&format!(
            "warning: non-finite projection at hour(s) {}\n",
            hours.join(", ")
        ));
    }
    out
}

/// The feature table as an aligned terminal listing.
pub fn schema_table() -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<13} {:<29} {:<11} {}\n",
        "Feature", "Label", "Kind", "Training range"
    ));
    for feature in schema() {
        out.push_str(&format!(
            "{:<13} {:<29} {:<11} [{}, {}]\n",
            feature.name,
            feature.label,
            kind_name(feature.kind),
            fmt_num(feature.min),
            fmt_num(feature.max),
        ));
    }
    out.push('\n');
    out.push_str(SCALE_NOTE);
    out.push('\n');
    out
}

/// The feature table in the markdown form the training side publishes.
pub fn schema_markdown() -> String {
    let mut out = String::new();
    out.push_str(&format!("| {:<28}| {:<8}| {:<8}|\n", "Feature", "Min", "Max"));
    out.push_str(&format!("|{}|{}|{}|\n", "-".repeat(29), "-".repeat(9), "-".repeat(9)));
    for feature in schema() {
        out.push_str(&format!(
            "| {:<28}| {:<8}| {:<8}|\n",
            feature.label,
            fmt_num(feature.min),
            fmt_num(feature.max),
        ));
    }
    out
}

fn kind_name(kind: FeatureKind) -> &'static str {
    match kind {
        FeatureKind::Continuous => "continuous",
        FeatureKind::Integer => "integer",
    }
}

fn fmt_num(value: f64) -> String {
    format!("{value}")
}
