//! Test support: stub predictors and ready-made vectors.
//!
//! Available when the `testing` feature is enabled, or when running this
//! crate's own tests:
//!
//! ```toml
//! [dev-dependencies]
//! vassago-core = { version = "...", features = ["testing"] }
//! ```

use std::cell::RefCell;

use crate::error::{Error, Result};
use crate::predict::Predictor;
use crate::schema::schema;
use crate::vector::FeatureVector;

/// A vector holding every feature at its documented training minimum.
///
/// Handy as a fixed starting point; the hour lands at 0.
pub fn baseline_vector() -> FeatureVector {
    let pairs: Vec<(&str, f64)> = schema().iter().map(|f| (f.name, f.min)).collect();
    FeatureVector::from_pairs(pairs).unwrap()
}

/// Predictor that answers the same raw log2 value for every vector.
#[derive(Debug, Clone, Copy)]
pub struct ConstantPredictor(pub f64);

impl Predictor for ConstantPredictor {
    fn predict(&self, _vector: &FeatureVector) -> Result<f64> {
        Ok(self.0)
    }
}

/// Predictor that fails every call with the given message.
#[derive(Debug, Clone, Copy)]
pub struct FailingPredictor(pub &'static str);

impl Predictor for FailingPredictor {
    fn predict(&self, _vector: &FeatureVector) -> Result<f64> {
        Err(Error::prediction(self.0))
    }
}

/// Predictor that records every vector it sees and echoes the hour back
/// as the raw log2 prediction.
///
/// The echo makes each hour's transformed output distinct (`2^hour`), so
/// tests can tell the 24 trend points apart.
#[derive(Debug, Default)]
pub struct HourEchoPredictor {
    calls: RefCell<Vec<FeatureVector>>,
}

impl HourEchoPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every vector passed to [`Predictor::predict`], in call order.
    pub fn calls(&self) -> Vec<FeatureVector> {
        self.calls.borrow().clone()
    }
}

impl Predictor for HourEchoPredictor {
    fn predict(&self, vector: &FeatureVector) -> Result<f64> {
        self.calls.borrow_mut().push(vector.clone());
        Ok(vector.hour())
    }
}

/// Predictor that fails only at one specific hour.
///
/// Exercises the all-or-nothing contract of trend projection: 23 good
/// answers and one failure must still abort the whole series.
#[derive(Debug, Clone, Copy)]
pub struct FailAtHourPredictor {
    /// Hour that triggers the failure.
    pub hour: u8,
    /// Raw log2 value returned for every other hour.
    pub value: f64,
}

impl Predictor for FailAtHourPredictor {
    fn predict(&self, vector: &FeatureVector) -> Result<f64> {
        if vector.hour() == f64::from(self.hour) {
            Err(Error::prediction(format!("scripted failure at hour {}", self.hour)))
        } else {
            Ok(self.value)
        }
    }
}
