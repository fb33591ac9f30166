//! The fixed input schema of the energy regression model.
//!
//! Every part of the crate that touches feature values goes through this
//! table: vector assembly iterates it, trend projection indexes into it,
//! and the range check reads its documented domains. Order matters. The
//! model was trained on columns in exactly this sequence, and a vector
//! handed to a predictor is always laid out the same way.

use serde::{Deserialize, Serialize};

/// Number of features the model consumes.
pub const FEATURE_COUNT: usize = 18;

/// Schema position of the hour-of-day feature.
pub const HOUR: usize = 9;

/// Length of the daily trend horizon, one prediction per hour.
pub const HOURS_PER_DAY: usize = 24;

/// Value kind of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Physical measurement; fractional precision is preserved.
    Continuous,
    /// Calendar or clock component; values are coerced to whole numbers.
    Integer,
}

impl FeatureKind {
    /// Apply the kind's coercion to a raw value.
    ///
    /// Integer features round half away from zero, so `10.5` becomes `11.0`
    /// and `-0.5` becomes `-1.0`. Continuous features pass through untouched.
    pub fn coerce(self, value: f64) -> f64 {
        match self {
            FeatureKind::Continuous => value,
            FeatureKind::Integer => value.round(),
        }
    }
}

/// A single named model input.
#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    /// Column name the model was trained against.
    pub name: &'static str,
    /// Human-readable label, with unit where one applies.
    pub label: &'static str,
    /// Value kind.
    pub kind: FeatureKind,
    /// Smallest value seen in the training data.
    pub min: f64,
    /// Largest value seen in the training data.
    pub max: f64,
}

impl Feature {
    /// Whether `value` lies inside the documented training range.
    ///
    /// The range is advisory. Callers may feed values outside it and the
    /// model will extrapolate; see [`FeatureVector::check_ranges`] for the
    /// opt-in enforcement path.
    ///
    /// [`FeatureVector::check_ranges`]: crate::vector::FeatureVector::check_ranges
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The canonical feature table, in training order.
///
/// Ranges come from the training split of the appliances energy dataset.
static FEATURES: [Feature; FEATURE_COUNT] = [
    Feature {
        name: "T_out",
        label: "Outside Temperature (°C)",
        kind: FeatureKind::Continuous,
        min: -4.9,
        max: 19.33,
    },
    Feature {
        name: "Press_mm_hg",
        label: "Outside Pressure (mm Hg)",
        kind: FeatureKind::Continuous,
        min: 736.77,
        max: 772.27,
    },
    Feature {
        name: "RH_out",
        label: "Outside Humidity (%)",
        kind: FeatureKind::Continuous,
        min: 40.83,
        max: 100.0,
    },
    Feature {
        name: "Windspeed",
        label: "Windspeed (m/s)",
        kind: FeatureKind::Continuous,
        min: 0.0,
        max: 10.33,
    },
    Feature {
        name: "Visibility",
        label: "Visibility (km)",
        kind: FeatureKind::Continuous,
        min: 12.67,
        max: 56.5,
    },
    Feature {
        name: "Tdewpoint",
        label: "Dew Point (°C)",
        kind: FeatureKind::Continuous,
        min: -6.4,
        max: 13.5,
    },
    Feature {
        name: "day_of_month",
        label: "Day of Month",
        kind: FeatureKind::Integer,
        min: 1.0,
        max: 31.0,
    },
    Feature {
        name: "day_of_week",
        label: "Day of Week",
        kind: FeatureKind::Integer,
        min: 0.0,
        max: 6.0,
    },
    Feature {
        name: "month",
        label: "Month",
        kind: FeatureKind::Integer,
        min: 1.0,
        max: 5.0,
    },
    Feature {
        name: "hour",
        label: "Hour of Day",
        kind: FeatureKind::Integer,
        min: 0.0,
        max: 23.0,
    },
    Feature {
        name: "T_mean",
        label: "Mean Indoor Temperature (°C)",
        kind: FeatureKind::Continuous,
        min: 14.73,
        max: 24.44,
    },
    Feature {
        name: "T_max",
        label: "Max Indoor Temperature (°C)",
        kind: FeatureKind::Continuous,
        min: 18.09,
        max: 27.03,
    },
    Feature {
        name: "T_min",
        label: "Min Indoor Temperature (°C)",
        kind: FeatureKind::Continuous,
        min: -5.62,
        max: 21.43,
    },
    Feature {
        name: "T_std",
        label: "Std Indoor Temperature",
        kind: FeatureKind::Continuous,
        min: 0.93,
        max: 8.43,
    },
    Feature {
        name: "RH_mean",
        label: "Mean Indoor Humidity (%)",
        kind: FeatureKind::Continuous,
        min: 29.5,
        max: 54.79,
    },
    Feature {
        name: "RH_max",
        label: "Max Indoor Humidity (%)",
        kind: FeatureKind::Continuous,
        min: 36.9,
        max: 99.9,
    },
    Feature {
        name: "RH_min",
        label: "Min Indoor Humidity (%)",
        kind: FeatureKind::Continuous,
        min: 1.0,
        max: 45.75,
    },
    Feature {
        name: "RH_std",
        label: "Std Indoor Humidity",
        kind: FeatureKind::Continuous,
        min: 1.95,
        max: 20.78,
    },
];

/// The ordered feature schema.
pub fn schema() -> &'static [Feature] {
    &FEATURES
}

/// Schema position of a feature name, if it exists.
pub fn position(name: &str) -> Option<usize> {
    FEATURES.iter().position(|f| f.name == name)
}

/// Feature definition by schema name, if it exists.
pub fn feature(name: &str) -> Option<&'static Feature> {
    position(name).map(|idx| &FEATURES[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn schema_has_eighteen_features() {
        assert_eq!(schema().len(), FEATURE_COUNT);
    }

    #[test]
    fn feature_names_are_unique() {
        let names: HashSet<&str> = schema().iter().map(|f| f.name).collect();
        assert_eq!(names.len(), FEATURE_COUNT);
    }

    #[test]
    fn schema_order_matches_the_training_columns() {
        let names: Vec<&str> = schema().iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            [
                "T_out",
                "Press_mm_hg",
                "RH_out",
                "Windspeed",
                "Visibility",
                "Tdewpoint",
                "day_of_month",
                "day_of_week",
                "month",
                "hour",
                "T_mean",
                "T_max",
                "T_min",
                "T_std",
                "RH_mean",
                "RH_max",
                "RH_min",
                "RH_std",
            ]
        );
    }

    #[test]
    fn hour_constant_points_at_hour_feature() {
        assert_eq!(schema()[HOUR].name, "hour");
        assert_eq!(position("hour"), Some(HOUR));
    }

    #[test]
    fn hour_domain_covers_a_day() {
        let hour = feature("hour").unwrap();
        assert_eq!(hour.kind, FeatureKind::Integer);
        assert_eq!(hour.min, 0.0);
        assert_eq!(hour.max, 23.0);
    }

    #[test]
    fn calendar_features_are_integer_kind() {
        for name in ["day_of_month", "day_of_week", "month", "hour"] {
            assert_eq!(feature(name).unwrap().kind, FeatureKind::Integer, "{name}");
        }
        assert_eq!(feature("T_out").unwrap().kind, FeatureKind::Continuous);
    }

    #[test]
    fn domains_are_well_formed() {
        for f in schema() {
            assert!(f.min <= f.max, "{} has inverted domain", f.name);
        }
    }

    #[test]
    fn integer_coercion_rounds_half_away_from_zero() {
        assert_eq!(FeatureKind::Integer.coerce(10.5), 11.0);
        assert_eq!(FeatureKind::Integer.coerce(-0.5), -1.0);
        assert_eq!(FeatureKind::Integer.coerce(3.2), 3.0);
        assert_eq!(FeatureKind::Continuous.coerce(10.5), 10.5);
    }

    #[test]
    fn contains_is_inclusive_at_both_ends() {
        let t_out = feature("T_out").unwrap();
        assert!(t_out.contains(-4.9));
        assert!(t_out.contains(19.33));
        assert!(!t_out.contains(19.34));
        assert!(!t_out.contains(f64::NAN));
    }

    #[test]
    fn unknown_name_has_no_position() {
        assert_eq!(position("Appliances"), None);
        assert!(feature("lights").is_none());
    }
}
