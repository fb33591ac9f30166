//! Output transform from the model's native unit to watt hours.
//!
//! The regression model predicts the base-2 logarithm of energy, a
//! training-time choice that tames the long tail of the consumption
//! distribution. Everything user-facing reports watt hours, so the inverse
//! transform lives here, in exactly one place.

/// Convert a raw base-2 log prediction into watt hours.
///
/// Total over all inputs: overflow saturates to `+inf`, NaN propagates,
/// and both come back as ordinary (if degenerate) values rather than
/// errors. Classifying degenerate outputs is the caller's business, via
/// [`PredictionResult::is_degenerate`](crate::predict::PredictionResult::is_degenerate).
pub fn watt_hours(log2_energy: f64) -> f64 {
    log2_energy.exp2()
}
