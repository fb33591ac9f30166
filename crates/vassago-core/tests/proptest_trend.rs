//! Property-based tests for vector assembly and trend projection.
//!
//! These tests verify that pipeline properties hold across a wide range of inputs:
//! - Assembly is total over complete in-domain input maps
//! - The watt-hour transform is positive and monotonic over finite inputs
//! - Trend projection always yields 24 points with hours 0..=23 ascending
//! - A single failing hour aborts the whole projection
//!
//! Run with: cargo test --test proptest_trend

use std::ops::RangeInclusive;

use proptest::prelude::*;

use vassago_core::testing::{ConstantPredictor, FailAtHourPredictor, HourEchoPredictor};
use vassago_core::{
    predict_energy, project_day, schema, Error, FeatureKind, FeatureVector, HOURS_PER_DAY,
};

/// Strategy producing one in-domain value per schema feature, in order.
fn in_domain_values() -> Vec<RangeInclusive<f64>> {
    schema().iter().map(|f| f.min..=f.max).collect()
}

/// Strategy for an hour of day.
fn hour_strategy() -> impl Strategy<Value = u8> {
    0u8..24
}

/// Strategy for a raw model output well inside f64's exponent range.
fn raw_log2_strategy() -> impl Strategy<Value = f64> {
    -40.0f64..40.0
}

fn vector_from(values: &[f64]) -> FeatureVector {
    let pairs: Vec<(&str, f64)> = schema()
        .iter()
        .map(|f| f.name)
        .zip(values.iter().copied())
        .collect();
    FeatureVector::from_pairs(pairs).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        max_shrink_iters: 100,
        ..ProptestConfig::default()
    })]

    /// Property: a complete in-domain map always assembles, continuous values
    /// survive untouched and integer features come out whole.
    #[test]
    fn prop_assembly_total_over_in_domain_maps(values in in_domain_values()) {
        let vector = vector_from(&values);
        for (feature, supplied) in schema().iter().zip(values.iter()) {
            let stored = vector.get(feature.name).unwrap();
            match feature.kind {
                FeatureKind::Continuous => prop_assert_eq!(stored, *supplied),
                FeatureKind::Integer => {
                    prop_assert_eq!(stored, supplied.round());
                    prop_assert_eq!(stored.fract(), 0.0);
                }
            }
        }
        prop_assert!(vector.check_ranges().is_ok());
    }

    /// Property: dropping any single feature from the map fails assembly
    /// with that feature's name.
    #[test]
    fn prop_missing_feature_is_named(
        values in in_domain_values(),
        gap in 0usize..vassago_core::FEATURE_COUNT,
    ) {
        let dropped = schema()[gap].name;
        let pairs: Vec<(&str, f64)> = schema()
            .iter()
            .zip(values.iter())
            .filter(|(f, _)| f.name != dropped)
            .map(|(f, v)| (f.name, *v))
            .collect();

        match FeatureVector::from_pairs(pairs) {
            Err(Error::MissingFeature { name }) => prop_assert_eq!(name, dropped),
            other => prop_assert!(false, "expected MissingFeature, got {:?}", other.map(|_| ())),
        }
    }

    /// Property: the transform is positive over finite inputs and
    /// order-preserving.
    #[test]
    fn prop_transform_positive_and_monotonic(
        a in raw_log2_strategy(),
        b in raw_log2_strategy(),
    ) {
        let fa = vassago_core::watt_hours(a);
        let fb = vassago_core::watt_hours(b);
        prop_assert!(fa > 0.0);
        prop_assert!(fb > 0.0);
        if a <= b {
            prop_assert!(fa <= fb);
        } else {
            prop_assert!(fa >= fb);
        }
    }

    /// Property: the projection has exactly 24 points and hour h sits at
    /// index h, whatever the base vector looks like.
    #[test]
    fn prop_trend_hours_ascend(values in in_domain_values(), raw in raw_log2_strategy()) {
        let base = vector_from(&values);
        let series = project_day(&base, &ConstantPredictor(raw)).unwrap();
        prop_assert_eq!(series.points().len(), HOURS_PER_DAY);
        for (idx, point) in series.points().iter().enumerate() {
            prop_assert_eq!(point.hour as usize, idx);
        }
    }

    /// Property: the sweep changes only the hour; every other feature
    /// reaches the predictor with its base value, for all 24 calls.
    #[test]
    fn prop_sweep_holds_non_hour_features_fixed(
        values in in_domain_values(),
        base_hour in hour_strategy(),
    ) {
        let base = vector_from(&values).with_hour(base_hour);
        let predictor = HourEchoPredictor::new();
        project_day(&base, &predictor).unwrap();

        let calls = predictor.calls();
        prop_assert_eq!(calls.len(), HOURS_PER_DAY);
        for (hour, seen) in calls.iter().enumerate() {
            prop_assert_eq!(seen.hour(), hour as f64);
            for feature in schema().iter().filter(|f| f.name != "hour") {
                prop_assert_eq!(seen.get(feature.name), base.get(feature.name));
            }
        }
        // The base itself is left alone.
        prop_assert_eq!(base.hour(), f64::from(base_hour));
    }

    /// Property: the single prediction at hour h equals trend point h when
    /// the model only looks at the hour.
    #[test]
    fn prop_single_and_trend_agree(values in in_domain_values(), hour in hour_strategy()) {
        let base = vector_from(&values);
        let single = predict_energy(&HourEchoPredictor::new(), &base.with_hour(hour)).unwrap();
        let series = project_day(&base, &HourEchoPredictor::new()).unwrap();
        prop_assert_eq!(series.points()[hour as usize].energy_wh, single.energy_wh);
    }

    /// Property: one failing hour aborts the whole projection, whichever
    /// hour it is.
    #[test]
    fn prop_single_failure_aborts_projection(
        values in in_domain_values(),
        bad_hour in hour_strategy(),
    ) {
        let base = vector_from(&values);
        let predictor = FailAtHourPredictor { hour: bad_hour, value: 1.0 };
        match project_day(&base, &predictor) {
            Err(Error::Prediction { .. }) => {}
            other => prop_assert!(false, "expected Prediction, got {:?}", other.map(|_| ())),
        }
    }

    /// Property: pushing one value past its documented maximum is caught by
    /// the opt-in check and names the feature, while assembly still accepts it.
    #[test]
    fn prop_range_check_names_the_violation(
        values in in_domain_values(),
        target in 0usize..vassago_core::FEATURE_COUNT,
        excess in 1.0f64..1000.0,
    ) {
        let mut values = values;
        values[target] = schema()[target].max + excess;
        let vector = vector_from(&values);

        match vector.check_ranges() {
            Err(Error::OutOfRange { violations }) => {
                prop_assert!(violations.iter().any(|v| v.feature == schema()[target].name));
            }
            other => prop_assert!(false, "expected OutOfRange, got {:?}", other),
        }
    }
}

#[test]
fn constant_five_at_noon_gives_32_wh_and_a_flat_trend() {
    let pairs: Vec<(&str, f64)> = schema().iter().map(|f| (f.name, f.min)).collect();
    let vector = FeatureVector::from_pairs(pairs).unwrap().with_hour(12);

    let result = predict_energy(&ConstantPredictor(5.0), &vector).unwrap();
    assert_eq!(result.energy_wh, 32.0);

    let series = project_day(&vector, &ConstantPredictor(5.0)).unwrap();
    assert_eq!(series.points().len(), HOURS_PER_DAY);
    assert!(series.points().iter().all(|p| p.energy_wh == 32.0));
}

#[test]
fn degenerate_projection_is_returned_not_rejected() {
    let base = vassago_core::testing::baseline_vector();
    let series = project_day(&base, &ConstantPredictor(f64::INFINITY)).unwrap();
    assert_eq!(series.points().len(), HOURS_PER_DAY);
    assert_eq!(series.degenerate_hours().len(), HOURS_PER_DAY);
}

#[test]
fn trend_serializes_hour_and_watt_hours() {
    let base = vassago_core::testing::baseline_vector();
    let series = project_day(&base, &ConstantPredictor(0.0)).unwrap();
    let json = serde_json::to_value(&series).unwrap();
    let points = json.as_array().unwrap();
    assert_eq!(points.len(), 24);
    assert_eq!(points[7]["hour"], 7);
    assert_eq!(points[7]["energy_wh"], 1.0);
}
