//! PNG line chart of the daily trend.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;
use tracing::{info, warn};

use vassago_core::TrendSeries;

/// Render the trend as a line chart with per-hour markers.
///
/// Non-finite points cannot be plotted; they are dropped from the series
/// and reported, and a chart with no finite points at all is skipped
/// entirely rather than written empty.
pub fn write_trend_chart(series: &TrendSeries, path: &Path) -> Result<(), Box<dyn Error>> {
    let Some((_, max_wh)) = series.finite_bounds() else {
        warn!(path = %path.display(), "no finite trend points; chart not written");
        return Ok(());
    };
    let degenerate = series.degenerate_hours();
    if !degenerate.is_empty() {
        warn!(hours = ?degenerate, "dropping non-finite points from chart");
    }

    let y_max = if max_wh > 0.0 { max_wh * 1.1 } else { 1.0 };
    let points: Vec<(u32, f64)> = series
        .points()
        .iter()
        .filter(|p| p.energy_wh.is_finite())
        .map(|p| (u32::from(p.hour), p.energy_wh))
        .collect();

    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Predicted Energy Trend Across a Day", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0u32..23u32, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_labels(24)
        .x_desc("Hour of Day")
        .y_desc("Predicted Energy (Wh)")
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), &BLUE))?;
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, BLUE.filled())),
    )?;

    root.present()?;
    info!(path = %path.display(), points = points.len(), "trend chart written");
    Ok(())
}
