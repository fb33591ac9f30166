//! The forest model: metadata plus trees, exposed as a core `Predictor`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use vassago_core::{Error as CoreError, FeatureVector, Predictor, FEATURE_COUNT};

use crate::error::{ModelError, Result};
use crate::tree::DecisionTree;

/// Descriptive fields carried alongside the trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Free-form model identifier.
    pub model_id: String,
    /// Number of features each row must carry.
    pub feature_count: u16,
    /// Number of trees the payload declares.
    pub tree_count: u32,
    /// Unix timestamp of export.
    pub created_at: u64,
    /// Version of the exporter that produced the model.
    pub exporter_version: String,
}

impl ModelMetadata {
    /// Create metadata for a freshly built model.
    pub fn new(model_id: impl Into<String>, tree_count: u32) -> Self {
        Self {
            model_id: model_id.into(),
            feature_count: FEATURE_COUNT as u16,
            tree_count,
            created_at: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            exporter_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// A validated random-forest regression model.
///
/// The regression output is the mean of the tree outputs, in the model's
/// native unit (log2 watt hours). A `ForestModel` is loaded once, injected
/// as a [`Predictor`], and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestModel {
    metadata: ModelMetadata,
    trees: Vec<DecisionTree>,
}

impl ForestModel {
    /// Assemble a model, validating metadata against the trees.
    pub fn new(metadata: ModelMetadata, trees: Vec<DecisionTree>) -> Result<Self> {
        let model = Self { metadata, trees };
        model.validate()?;
        Ok(model)
    }

    /// Full structural validation.
    ///
    /// Runs on every construction and again after each decode, since
    /// serde derives happily produce an unchecked `ForestModel`.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(ModelError::EmptyForest);
        }
        if self.metadata.feature_count as usize != FEATURE_COUNT {
            return Err(ModelError::FeatureCountMismatch {
                expected: FEATURE_COUNT,
                found: self.metadata.feature_count as usize,
            });
        }
        if self.metadata.tree_count as usize != self.trees.len() {
            return Err(ModelError::invalid(format!(
                "metadata declares {} trees, payload has {}",
                self.metadata.tree_count,
                self.trees.len()
            )));
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(idx)?;
        }
        Ok(())
    }

    /// Borrow the metadata.
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Borrow the trees.
    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Number of trees in the ensemble.
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Total node count across all trees.
    pub fn node_count(&self) -> usize {
        self.trees.iter().map(DecisionTree::len).sum()
    }

    /// Deepest root-to-leaf path across all trees.
    pub fn max_depth(&self) -> usize {
        self.trees.iter().map(DecisionTree::depth).max().unwrap_or(0)
    }
}

impl Predictor for ForestModel {
    fn predict(&self, vector: &FeatureVector) -> vassago_core::Result<f64> {
        if self.trees.is_empty() {
            return Err(CoreError::prediction("model has no trees"));
        }
        let mut sum = 0.0;
        for (idx, tree) in self.trees.iter().enumerate() {
            let output = tree.evaluate(vector.values()).ok_or_else(|| {
                CoreError::prediction(format!("tree {idx} is structurally malformed"))
            })?;
            sum += output;
        }
        let mean = sum / self.trees.len() as f64;
        debug!(trees = self.trees.len(), log2_energy = mean, "forest evaluated");
        Ok(mean)
    }
}
