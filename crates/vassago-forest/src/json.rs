//! JSON import for exporter interchange.
//!
//! The Python-side exporter serializes the model in exactly the shape the
//! serde derives produce, so import is deserialize-then-validate. JSON is
//! the interchange format; `.vrf` is what deployments actually ship.

use std::io::{BufReader, Read, Write};
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::model::ForestModel;

impl ForestModel {
    /// Parse a model from a JSON reader, validating before returning.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let model: ForestModel = serde_json::from_reader(reader)?;
        model.validate()?;
        Ok(model)
    }

    /// Parse a model from a JSON string, validating before returning.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let model: ForestModel = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Read an exporter JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let model = Self::from_json_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            model_id = %model.metadata().model_id,
            trees = model.tree_count(),
            "imported model from JSON"
        );
        Ok(model)
    }

    /// Write the model as exporter-shaped JSON.
    pub fn to_json_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::model::ModelMetadata;
    use crate::tree::DecisionTree;
    use vassago_core::testing::baseline_vector;
    use vassago_core::Predictor;

    const EXPORTER_JSON: &str = r#"{
        "metadata": {
            "model_id": "rf-appliances-2016",
            "feature_count": 18,
            "tree_count": 2,
            "created_at": 1456704000,
            "exporter_version": "0.4.1"
        },
        "trees": [
            { "nodes": [ { "leaf": { "value": 5.0 } } ] },
            { "nodes": [
                { "split": { "feature": 9, "threshold": 11.5, "left": 1, "right": 2 } },
                { "leaf": { "value": 3.0 } },
                { "leaf": { "value": 7.0 } }
            ] }
        ]
    }"#;

    #[test]
    fn exporter_json_imports_and_predicts() {
        let model = ForestModel::from_json_str(EXPORTER_JSON).unwrap();
        assert_eq!(model.metadata().model_id, "rf-appliances-2016");
        assert_eq!(model.tree_count(), 2);

        // Baseline hour is 0, so the split tree answers 3.0; mean of (5, 3).
        let raw = model.predict(&baseline_vector()).unwrap();
        assert_eq!(raw, 4.0);
    }

    #[test]
    fn imported_json_matches_vrf_roundtrip() {
        let model = ForestModel::from_json_str(EXPORTER_JSON).unwrap();
        let mut vrf = Vec::new();
        model.write_to(&mut vrf).unwrap();
        let reloaded = ForestModel::read_from(&mut vrf.as_slice()).unwrap();
        assert_eq!(reloaded, model);
    }

    #[test]
    fn json_writer_output_reimports() {
        let model = ForestModel::new(
            ModelMetadata::new("emit", 1),
            vec![DecisionTree::leaf(2.5)],
        )
        .unwrap();
        let mut json = Vec::new();
        model.to_json_writer(&mut json).unwrap();
        let reread = ForestModel::from_json_reader(json.as_slice()).unwrap();
        assert_eq!(reread, model);
    }

    #[test]
    fn syntactically_broken_json_is_a_json_error() {
        let err = ForestModel::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ModelError::Json(_)));
    }

    #[test]
    fn structurally_broken_import_is_rejected() {
        let json = EXPORTER_JSON.replace("\"feature_count\": 18", "\"feature_count\": 4");
        let err = ForestModel::from_json_str(&json).unwrap_err();
        assert!(matches!(err, ModelError::FeatureCountMismatch { found: 4, .. }));
    }

    #[test]
    fn empty_tree_list_is_rejected_on_import() {
        let json = r#"{
            "metadata": {
                "model_id": "hollow",
                "feature_count": 18,
                "tree_count": 0,
                "created_at": 0,
                "exporter_version": "0.0.0"
            },
            "trees": []
        }"#;
        let err = ForestModel::from_json_str(json).unwrap_err();
        assert!(matches!(err, ModelError::EmptyForest));
    }

    #[test]
    fn load_json_reads_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, EXPORTER_JSON).unwrap();

        let model = ForestModel::load_json(&path).unwrap();
        assert_eq!(model.tree_count(), 2);
    }
}
