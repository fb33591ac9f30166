//! Feature-vector assembly from per-feature value sources.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{self, Feature, FEATURE_COUNT, HOUR};

/// Per-feature scalar provider.
///
/// This is the boundary between the core and whatever front-end gathers
/// values: a form, CLI flags, a JSON body. A source answers one feature at
/// a time and returns `None` when it has nothing for that feature, which
/// assembly reports as [`Error::MissingFeature`].
pub trait ValueSource {
    /// The raw value for `feature`, or `None` if the source cannot supply one.
    fn value(&self, feature: &Feature) -> Option<f64>;
}

impl ValueSource for HashMap<String, f64> {
    fn value(&self, feature: &Feature) -> Option<f64> {
        self.get(feature.name).copied()
    }
}

impl ValueSource for BTreeMap<String, f64> {
    fn value(&self, feature: &Feature) -> Option<f64> {
        self.get(feature.name).copied()
    }
}

impl<S: ValueSource + ?Sized> ValueSource for &S {
    fn value(&self, feature: &Feature) -> Option<f64> {
        (**self).value(feature)
    }
}

/// A complete assignment of values to every schema feature.
///
/// Values are stored in schema order, so the slice handed to a predictor
/// always has the training column layout. Construction is total: once a
/// `FeatureVector` exists, every feature has a value.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Assemble a vector by querying `source` for every schema feature in order.
    ///
    /// Integer-kind features are rounded to whole numbers; continuous
    /// features keep their fractional precision. Values outside the
    /// documented ranges pass through unchanged; enforcement is the
    /// separate, opt-in [`check_ranges`](FeatureVector::check_ranges).
    pub fn collect<S: ValueSource>(source: &S) -> Result<Self> {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, feature) in values.iter_mut().zip(schema::schema()) {
            let raw = source
                .value(feature)
                .ok_or(Error::MissingFeature { name: feature.name })?;
            *slot = feature.kind.coerce(raw);
        }
        debug!(hour = values[HOUR], "assembled feature vector");
        Ok(Self { values })
    }

    /// Build a vector from `(name, value)` pairs.
    ///
    /// Every schema feature must appear exactly once. Unknown names and
    /// duplicates are rejected outright rather than ignored, so a typo in
    /// an input file cannot silently leave a feature at some default.
    pub fn from_pairs<I, N>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, f64)>,
        N: AsRef<str>,
    {
        let mut values = [0.0; FEATURE_COUNT];
        let mut seen = [false; FEATURE_COUNT];
        for (name, raw) in pairs {
            let name = name.as_ref();
            let idx = schema::position(name).ok_or_else(|| Error::UnknownFeature {
                name: name.to_string(),
            })?;
            let feature = &schema::schema()[idx];
            if seen[idx] {
                return Err(Error::DuplicateFeature { name: feature.name });
            }
            seen[idx] = true;
            values[idx] = feature.kind.coerce(raw);
        }
        if let Some(idx) = seen.iter().position(|claimed| !claimed) {
            return Err(Error::MissingFeature {
                name: schema::schema()[idx].name,
            });
        }
        Ok(Self { values })
    }

    /// Copy of this vector with the hour-of-day feature replaced.
    ///
    /// The trend projector derives its 24 vectors this way. The base vector
    /// is never mutated, and each derived copy is independent.
    pub fn with_hour(&self, hour: u8) -> Self {
        let mut derived = self.clone();
        derived.values[HOUR] = f64::from(hour);
        derived
    }

    /// Value of a feature by schema name.
    pub fn get(&self, name: &str) -> Option<f64> {
        schema::position(name).map(|idx| self.values[idx])
    }

    /// All values, in schema order.
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// The hour-of-day value.
    pub fn hour(&self) -> f64 {
        self.values[HOUR]
    }

    /// Check every value against its documented training range.
    ///
    /// Assembly never calls this. The ranges describe the training data,
    /// not hard limits, and the model may legitimately be asked to
    /// extrapolate. Callers that do want enforcement invoke it explicitly
    /// and receive every violation at once, not just the first.
    pub fn check_ranges(&self) -> Result<()> {
        let violations: Vec<RangeViolation> = schema::schema()
            .iter()
            .zip(self.values.iter())
            .filter(|(feature, value)| !feature.contains(**value))
            .map(|(feature, value)| RangeViolation {
                feature: feature.name,
                value: *value,
                min: feature.min,
                max: feature.max,
            })
            .collect();
        if violations.is_empty() {
            Ok(())
        } else {
            debug!(count = violations.len(), "range check failed");
            Err(Error::OutOfRange { violations })
        }
    }
}

impl Serialize for FeatureVector {
    /// Serializes as a name-to-value map in schema order.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (feature, value) in schema::schema().iter().zip(self.values.iter()) {
            map.serialize_entry(feature.name, value)?;
        }
        map.end()
    }
}

/// A value outside its feature's documented training range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeViolation {
    /// Schema name of the violating feature.
    pub feature: &'static str,
    /// The value that was supplied.
    pub value: f64,
    /// Documented minimum.
    pub min: f64,
    /// Documented maximum.
    pub max: f64,
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} outside [{}, {}]",
            self.feature, self.value, self.min, self.max
        )
    }
}
