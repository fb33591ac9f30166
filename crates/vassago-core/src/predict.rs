//! The predictor boundary and its transformed result.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::transform;
use crate::vector::FeatureVector;

/// A black-box regression model over the fixed feature schema.
///
/// Implementations receive a complete [`FeatureVector`] and answer in the
/// model's native unit: the base-2 logarithm of energy in watt hours.
/// A predictor is constructed once, injected wherever predictions are
/// needed, and treated as read-only thereafter. Nothing in this crate
/// holds a global model handle.
pub trait Predictor {
    /// Predict the raw log2 energy for one vector.
    fn predict(&self, vector: &FeatureVector) -> Result<f64>;

    /// Predict a batch of vectors, outputs in input order.
    ///
    /// The default issues one [`predict`](Predictor::predict) call per
    /// vector and stops at the first failure. Implementations backed by a
    /// runtime with a cheaper batched entry point may override it; the
    /// outputs must match what the per-vector path would produce.
    fn predict_batch(&self, vectors: &[FeatureVector]) -> Result<Vec<f64>> {
        vectors.iter().map(|v| self.predict(v)).collect()
    }
}

impl<P: Predictor + ?Sized> Predictor for &P {
    fn predict(&self, vector: &FeatureVector) -> Result<f64> {
        (**self).predict(vector)
    }

    fn predict_batch(&self, vectors: &[FeatureVector]) -> Result<Vec<f64>> {
        (**self).predict_batch(vectors)
    }
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn predict(&self, vector: &FeatureVector) -> Result<f64> {
        (**self).predict(vector)
    }

    fn predict_batch(&self, vectors: &[FeatureVector]) -> Result<Vec<f64>> {
        (**self).predict_batch(vectors)
    }
}

/// One transformed prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    /// The model's native output: log2 of the energy in watt hours.
    pub log2_energy: f64,
    /// `2^log2_energy`, the reported physical quantity.
    pub energy_wh: f64,
}

impl PredictionResult {
    /// Build a result from the model's raw output.
    pub fn from_log2(log2_energy: f64) -> Self {
        Self {
            log2_energy,
            energy_wh: transform::watt_hours(log2_energy),
        }
    }

    /// Whether the transformed output is NaN or infinite.
    ///
    /// A degenerate output is still a valid result. The transform never
    /// fails; how to show such a value is the presentation layer's call.
    pub fn is_degenerate(&self) -> bool {
        !self.energy_wh.is_finite()
    }
}

/// Run one prediction and transform it into watt hours.
pub fn predict_energy<P>(predictor: &P, vector: &FeatureVector) -> Result<PredictionResult>
where
    P: Predictor + ?Sized,
{
    let raw = predictor.predict(vector)?;
    let result = PredictionResult::from_log2(raw);
    if result.is_degenerate() {
        warn!(log2_energy = raw, "prediction transformed to a non-finite value");
    } else {
        debug!(
            log2_energy = raw,
            energy_wh = result.energy_wh,
            "prediction complete"
        );
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::schema;
    use crate::testing::{ConstantPredictor, FailingPredictor};
    use crate::Error;

    fn base_vector() -> FeatureVector {
        let pairs: Vec<(&str, f64)> = schema().iter().map(|f| (f.name, f.min)).collect();
        FeatureVector::from_pairs(pairs).unwrap()
    }

    #[test]
    fn constant_five_predicts_32_wh() {
        let result = predict_energy(&ConstantPredictor(5.0), &base_vector()).unwrap();
        assert_eq!(result.log2_energy, 5.0);
        assert_eq!(result.energy_wh, 32.0);
        assert!(!result.is_degenerate());
    }

    #[test]
    fn failure_surfaces_as_prediction_error() {
        let err = predict_energy(&FailingPredictor("offline"), &base_vector()).unwrap_err();
        match err {
            Error::Prediction { message, .. } => assert_eq!(message, "offline"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn overflow_is_degenerate_not_an_error() {
        let result = predict_energy(&ConstantPredictor(40_000.0), &base_vector()).unwrap();
        assert!(result.is_degenerate());
        assert_eq!(result.energy_wh, f64::INFINITY);
    }

    #[test]
    fn nan_output_is_degenerate() {
        let result = predict_energy(&ConstantPredictor(f64::NAN), &base_vector()).unwrap();
        assert!(result.is_degenerate());
    }

    #[test]
    fn default_batch_matches_single_calls() {
        let predictor = ConstantPredictor(2.0);
        let vectors = vec![base_vector(), base_vector().with_hour(5)];
        let outputs = predictor.predict_batch(&vectors).unwrap();
        assert_eq!(outputs, vec![2.0, 2.0]);
    }

    #[test]
    fn predictor_usable_through_references_and_boxes() {
        let boxed: Box<dyn Predictor> = Box::new(ConstantPredictor(1.0));
        let result = predict_energy(&boxed, &base_vector()).unwrap();
        assert_eq!(result.energy_wh, 2.0);

        let by_ref = &ConstantPredictor(3.0);
        let result = predict_energy(&by_ref, &base_vector()).unwrap();
        assert_eq!(result.energy_wh, 8.0);
    }

    #[test]
    fn result_serializes_both_units() {
        let result = PredictionResult::from_log2(5.0);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, "{\"log2_energy\":5.0,\"energy_wh\":32.0}");
    }
}
