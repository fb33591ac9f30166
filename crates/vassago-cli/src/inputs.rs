//! Feature value collection from input files and command-line pairs.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use vassago_core::{schema, Error, Feature, FeatureVector, ValueSource};

/// Merged feature values: JSON file first, `--set` pairs on top.
#[derive(Debug, Default)]
pub struct CliInputs {
    values: HashMap<String, f64>,
}

impl CliInputs {
    /// Build the merged input set.
    ///
    /// `sets` override file values by name. A name repeated within `sets`
    /// is a [`Error::DuplicateFeature`], and any name unknown to the
    /// schema is rejected before a vector is ever assembled.
    pub fn new(
        file_values: HashMap<String, f64>,
        sets: &[(String, f64)],
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut values = file_values;
        for name in values.keys() {
            reject_unknown(name)?;
        }

        let mut overridden: HashMap<String, f64> = HashMap::new();
        for (name, value) in sets {
            reject_unknown(name)?;
            if overridden.insert(name.clone(), *value).is_some() {
                let feature = schema()
                    .iter()
                    .find(|f| f.name == name.as_str())
                    .map(|f| f.name)
                    .unwrap_or("?");
                return Err(Box::new(Error::DuplicateFeature { name: feature }));
            }
        }
        values.extend(overridden);
        debug!(supplied = values.len(), "merged input values");
        Ok(Self { values })
    }

    /// Read a JSON object file of `name: number` entries.
    pub fn load_file(path: &Path) -> Result<HashMap<String, f64>, Box<dyn std::error::Error>> {
        let file = std::fs::File::open(path)?;
        let values: HashMap<String, f64> = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(values)
    }

    /// Assemble the complete feature vector.
    pub fn collect(&self) -> vassago_core::Result<FeatureVector> {
        FeatureVector::collect(self)
    }
}

impl ValueSource for CliInputs {
    fn value(&self, feature: &Feature) -> Option<f64> {
        self.values.get(feature.name).copied()
    }
}

fn reject_unknown(name: &str) -> Result<(), Box<dyn std::error::Error>> {
    if vassago_core::position(name).is_none() {
        return Err(Box::new(Error::UnknownFeature {
            name: name.to_string(),
        }));
    }
    Ok(())
}

/// Parse one `NAME=VALUE` pair for the `--set` flag.
pub fn parse_set(raw: &str) -> Result<(String, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("expected NAME=VALUE, got `{raw}`"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a number in `{raw}`", value.trim()))?;
    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_file_values() -> HashMap<String, f64> {
        schema().iter().map(|f| (f.name.to_string(), f.min)).collect()
    }

    #[test]
    fn parse_set_handles_plain_pairs() {
        assert_eq!(parse_set("T_out=5.5").unwrap(), ("T_out".to_string(), 5.5));
        assert_eq!(parse_set("hour = 14").unwrap(), ("hour".to_string(), 14.0));
        assert_eq!(
            parse_set("Tdewpoint=-3.25").unwrap(),
            ("Tdewpoint".to_string(), -3.25)
        );
    }

    #[test]
    fn parse_set_rejects_malformed_pairs() {
        assert!(parse_set("T_out").is_err());
        assert!(parse_set("=5").is_err());
        assert!(parse_set("hour=noon").is_err());
    }

    #[test]
    fn sets_override_file_values() {
        let inputs = CliInputs::new(
            full_file_values(),
            &[("hour".to_string(), 14.0), ("T_out".to_string(), 9.9)],
        )
        .unwrap();
        let vector = inputs.collect().unwrap();
        assert_eq!(vector.hour(), 14.0);
        assert_eq!(vector.get("T_out"), Some(9.9));
        assert_eq!(vector.get("RH_out"), Some(40.83));
    }

    #[test]
    fn unknown_file_key_is_rejected_before_assembly() {
        let mut values = full_file_values();
        values.insert("Appliances".to_string(), 60.0);
        let err = CliInputs::new(values, &[]).unwrap_err();
        assert!(err.to_string().contains("unknown feature `Appliances`"));
    }

    #[test]
    fn unknown_set_name_is_rejected() {
        let err = CliInputs::new(full_file_values(), &[("watts".to_string(), 1.0)]).unwrap_err();
        assert!(err.to_string().contains("unknown feature `watts`"));
    }

    #[test]
    fn repeated_set_name_is_a_duplicate() {
        let err = CliInputs::new(
            full_file_values(),
            &[("hour".to_string(), 1.0), ("hour".to_string(), 2.0)],
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate value for feature `hour`"));
    }

    #[test]
    fn missing_features_surface_from_collect() {
        let mut values = full_file_values();
        values.remove("RH_std");
        let inputs = CliInputs::new(values, &[]).unwrap();
        let err = inputs.collect().unwrap_err();
        assert!(matches!(err, Error::MissingFeature { name: "RH_std" }));
    }

    #[test]
    fn set_pairs_alone_can_cover_the_schema() {
        let sets: Vec<(String, f64)> = schema()
            .iter()
            .map(|f| (f.name.to_string(), f.max))
            .collect();
        let inputs = CliInputs::new(HashMap::new(), &sets).unwrap();
        let vector = inputs.collect().unwrap();
        assert_eq!(vector.get("Visibility"), Some(56.5));
    }

    #[test]
    fn input_file_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inputs.json");
        std::fs::write(&path, r#"{ "T_out": 3.5, "hour": 7 }"#).unwrap();

        let values = CliInputs::load_file(&path).unwrap();
        assert_eq!(values.get("T_out"), Some(&3.5));
        assert_eq!(values.get("hour"), Some(&7.0));
    }
}
