//! # Vassago Core
//!
//! Feature schema, vector assembly, and trend projection for the Vassago
//! household energy predictor.
//!
//! Vassago is named after the 3rd spirit of the Ars Goetia, who declares
//! things past and to come - fitting for a library whose whole job is
//! telling you what the day ahead will cost.
//!
//! ## Design Philosophy
//!
//! - **One schema, everywhere**: the 18-feature table in [`schema`] is the
//!   single source of truth; assembly and projection both walk it, so the
//!   record a predictor receives can never drift
//! - **Models are injected**: a [`Predictor`] arrives as a parameter and is
//!   treated as read-only; there is no global model handle
//! - **The transform is total**: `2^log2_energy` never fails, and NaN or
//!   infinite outputs flow through as ordinary, flagged values
//!
//! ## Core Pieces
//!
//! - [`FeatureVector`] - a complete, schema-ordered assignment of values
//! - [`ValueSource`] - per-feature provider backing [`FeatureVector::collect`]
//! - [`Predictor`] - the boundary behind which the regression model lives
//! - [`predict_energy`] - one prediction, transformed to watt hours
//! - [`project_day`] - the 24-point hourly trend, all other features fixed
//!
//! ## Example
//!
//! ```
//! use vassago_core::{predict_energy, project_day, FeatureVector, Predictor, Result};
//!
//! struct Flat;
//! impl Predictor for Flat {
//!     fn predict(&self, _: &FeatureVector) -> Result<f64> {
//!         Ok(5.0)
//!     }
//! }
//!
//! let pairs: Vec<(&str, f64)> = vassago_core::schema()
//!     .iter()
//!     .map(|f| (f.name, f.min))
//!     .collect();
//! let vector = FeatureVector::from_pairs(pairs)?;
//!
//! let result = predict_energy(&Flat, &vector)?;
//! assert_eq!(result.energy_wh, 32.0);
//!
//! let trend = project_day(&vector, &Flat)?;
//! assert_eq!(trend.points().len(), 24);
//! # Ok::<(), vassago_core::Error>(())
//! ```

pub mod error;
pub mod predict;
pub mod schema;
pub mod transform;
pub mod trend;
pub mod vector;

// Stub predictors and fixture vectors for downstream test suites.
// Available when the `testing` feature is enabled or during tests.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{Error, Result};
pub use predict::{predict_energy, PredictionResult, Predictor};
pub use schema::{
    feature, position, schema, Feature, FeatureKind, FEATURE_COUNT, HOUR, HOURS_PER_DAY,
};
pub use transform::watt_hours;
pub use trend::{project_day, TrendPoint, TrendSeries};
pub use vector::{FeatureVector, RangeViolation, ValueSource};
