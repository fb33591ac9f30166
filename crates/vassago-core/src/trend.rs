//! 24-hour trend projection.
//!
//! Answers "if conditions stayed exactly like this all day, how would
//! consumption move hour by hour": every feature except the hour keeps its
//! collected value while the hour sweeps 0 through 23, one independent
//! prediction per hour.

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::predict::Predictor;
use crate::schema::HOURS_PER_DAY;
use crate::transform;
use crate::vector::FeatureVector;

/// One projected point of the daily trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Hour of day, 0 through 23.
    pub hour: u8,
    /// Predicted energy in watt hours at that hour.
    pub energy_wh: f64,
}

/// The full hourly projection, hours strictly ascending from 0 to 23.
///
/// Only [`project_day`] constructs one, so a `TrendSeries` in hand always
/// has exactly [`HOURS_PER_DAY`] points; a partial day is unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TrendSeries {
    points: Vec<TrendPoint>,
}

impl TrendSeries {
    /// The projected points, hour 0 first.
    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    /// Point with the highest finite projection, if any point is finite.
    pub fn peak(&self) -> Option<TrendPoint> {
        self.points
            .iter()
            .filter(|p| p.energy_wh.is_finite())
            .max_by(|a, b| a.energy_wh.total_cmp(&b.energy_wh))
            .copied()
    }

    /// Hours whose projection came out NaN or infinite.
    pub fn degenerate_hours(&self) -> Vec<u8> {
        self.points
            .iter()
            .filter(|p| !p.energy_wh.is_finite())
            .map(|p| p.hour)
            .collect()
    }

    /// Smallest and largest finite projections, for axis scaling.
    pub fn finite_bounds(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for point in self.points.iter().filter(|p| p.energy_wh.is_finite()) {
            bounds = Some(match bounds {
                None => (point.energy_wh, point.energy_wh),
                Some((lo, hi)) => (lo.min(point.energy_wh), hi.max(point.energy_wh)),
            });
        }
        bounds
    }
}

/// Project a day of consumption from one assembled vector.
///
/// Derives 24 copies of `base` via [`FeatureVector::with_hour`] and runs
/// them through [`Predictor::predict_batch`], so an implementation with a
/// real batched entry point answers in one call. Any failure aborts the
/// whole projection; a partial trend is never returned. Degenerate
/// outputs, by contrast, stay in the series as the honest transform of
/// whatever the model said at that hour.
pub fn project_day<P>(base: &FeatureVector, predictor: &P) -> Result<TrendSeries>
where
    P: Predictor + ?Sized,
{
    let vectors: Vec<FeatureVector> = (0..HOURS_PER_DAY as u8)
        .map(|hour| base.with_hour(hour))
        .collect();
    let raw = predictor.predict_batch(&vectors)?;
    if raw.len() != vectors.len() {
        return Err(Error::prediction(format!(
            "batch predictor returned {} outputs for {} vectors",
            raw.len(),
            vectors.len()
        )));
    }
    let points: Vec<TrendPoint> = raw
        .into_iter()
        .enumerate()
        .map(|(hour, log2)| TrendPoint {
            hour: hour as u8,
            energy_wh: transform::watt_hours(log2),
        })
        .collect();
    debug!(
        degenerate = points.iter().filter(|p| !p.energy_wh.is_finite()).count(),
        "projected 24-hour trend"
    );
    Ok(TrendSeries { points })
}
