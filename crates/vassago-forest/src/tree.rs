//! Flat regression trees with iterative evaluation.

use serde::{Deserialize, Serialize};

use vassago_core::FEATURE_COUNT;

use crate::error::{ModelError, Result};

/// One node of a flattened decision tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// Terminal node carrying a raw log2 prediction.
    Leaf { value: f64 },
    /// Binary split: rows with `x[feature] <= threshold` descend to `left`,
    /// the rest to `right`.
    Split {
        feature: u16,
        threshold: f64,
        left: u32,
        right: u32,
    },
}

/// A regression tree stored as a flat node array, root at index 0.
///
/// Children always sit at higher indices than their parent. The exporter
/// emits trees that way and [`validate`](DecisionTree::validate) enforces
/// it, which bounds evaluation at `nodes.len()` steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub(crate) nodes: Vec<Node>,
}

impl DecisionTree {
    /// Build a tree from its node array, rejecting malformed structure.
    pub fn new(nodes: Vec<Node>) -> Result<Self> {
        let tree = Self { nodes };
        tree.validate(0)?;
        Ok(tree)
    }

    /// Single-leaf tree that always answers `value`.
    pub fn leaf(value: f64) -> Self {
        Self {
            nodes: vec![Node::Leaf { value }],
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes. Never true for a validated tree.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Maximum depth of any root-to-leaf path.
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], idx: usize, seen: usize) -> usize {
            if seen > nodes.len() {
                return seen;
            }
            match nodes.get(idx) {
                None | Some(Node::Leaf { .. }) => seen,
                Some(Node::Split { left, right, .. }) => walk(nodes, *left as usize, seen + 1)
                    .max(walk(nodes, *right as usize, seen + 1)),
            }
        }
        walk(&self.nodes, 0, 0)
    }

    /// Check structural soundness.
    ///
    /// `tree` is only used to label the error. A sound tree is non-empty,
    /// splits on schema features with finite thresholds, and every child
    /// index points forward and in range.
    pub fn validate(&self, tree: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(ModelError::structure(tree, "tree has no nodes"));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            if let Node::Split {
                feature,
                threshold,
                left,
                right,
            } = node
            {
                if *feature as usize >= FEATURE_COUNT {
                    return Err(ModelError::structure(
                        tree,
                        format!("node {idx} splits on feature {feature}, schema has {FEATURE_COUNT}"),
                    ));
                }
                if !threshold.is_finite() {
                    return Err(ModelError::structure(
                        tree,
                        format!("node {idx} has non-finite threshold"),
                    ));
                }
                for child in [*left as usize, *right as usize] {
                    if child >= self.nodes.len() {
                        return Err(ModelError::structure(
                            tree,
                            format!("node {idx} child {child} out of range"),
                        ));
                    }
                    if child <= idx {
                        return Err(ModelError::structure(
                            tree,
                            format!("node {idx} child {child} does not point forward"),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Evaluate the tree for one feature row.
    ///
    /// Total even over malformed node arrays: a bad index or a cycle
    /// yields `None` rather than a panic or an unbounded walk.
    pub fn evaluate(&self, x: &[f64; FEATURE_COUNT]) -> Option<f64> {
        let mut idx = 0usize;
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(idx)? {
                Node::Leaf { value } => return Some(*value),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = *x.get(*feature as usize)?;
                    idx = if value <= *threshold {
                        *left as usize
                    } else {
                        *right as usize
                    };
                }
            }
        }
        None
    }
}
