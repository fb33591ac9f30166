//! # Vassago Forest
//!
//! Random-forest evaluation and model persistence for the Vassago energy
//! predictor.
//!
//! The crate owns everything between bytes on disk and a live
//! [`Predictor`](vassago_core::Predictor): the flat-array tree
//! representation, the validated [`ForestModel`] ensemble, the `.vrf`
//! container format, and JSON import from the training-side exporter.
//! Prediction itself is just [`vassago_core::Predictor`] implemented for
//! [`ForestModel`], so the front-end never sees a tree.
//!
//! ## Example
//!
//! ```
//! use vassago_forest::{DecisionTree, ForestModel, ModelMetadata};
//! use vassago_core::{predict_energy, FeatureVector};
//!
//! let model = ForestModel::new(
//!     ModelMetadata::new("example", 1),
//!     vec![DecisionTree::leaf(5.0)],
//! )?;
//!
//! let pairs: Vec<(&str, f64)> = vassago_core::schema()
//!     .iter()
//!     .map(|f| (f.name, f.min))
//!     .collect();
//! let vector = FeatureVector::from_pairs(pairs)?;
//!
//! let result = predict_energy(&model, &vector)?;
//! assert_eq!(result.energy_wh, 32.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod format;
pub mod model;
pub mod tree;

mod json;

pub use error::{ModelError, Result};
pub use format::{VrfHeader, VRF_MAGIC, VRF_MAX_PAYLOAD, VRF_VERSION};
pub use model::{ForestModel, ModelMetadata};
pub use tree::{DecisionTree, Node};
