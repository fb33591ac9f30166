//! Run configuration for the predict subcommand.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Settings for one prediction run.
///
/// Deserialized from an optional JSON config file; command-line flags
/// override whatever the file says. Boolean flags only override in the
/// enabling direction.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictConfig {
    /// Path to the .vrf model file
    pub model: Option<PathBuf>,

    /// Path to a JSON object of feature values
    pub inputs: Option<PathBuf>,

    /// Treat documented training ranges as hard limits
    #[serde(default)]
    pub check_ranges: bool,

    /// Project the 24-hour trend after the single prediction
    #[serde(default = "default_trend")]
    pub trend: bool,

    /// Write the trend as a PNG chart to this path
    pub chart: Option<PathBuf>,

    /// Emit JSON instead of human output
    #[serde(default)]
    pub json: bool,
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self {
            model: None,
            inputs: None,
            check_ranges: false,
            trend: default_trend(),
            chart: None,
            json: false,
        }
    }
}

impl PredictConfig {
    /// Load a config file.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let file = std::fs::File::open(path)?;
        let config = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(config)
    }

    /// Overlay command-line flags on top of the file settings.
    pub fn apply_flags(
        mut self,
        model: Option<PathBuf>,
        inputs: Option<PathBuf>,
        check_ranges: bool,
        no_trend: bool,
        chart: Option<PathBuf>,
        json: bool,
    ) -> Self {
        if model.is_some() {
            self.model = model;
        }
        if inputs.is_some() {
            self.inputs = inputs;
        }
        if check_ranges {
            self.check_ranges = true;
        }
        if no_trend {
            self.trend = false;
        }
        if chart.is_some() {
            self.chart = chart;
        }
        if json {
            self.json = true;
        }
        self
    }
}

fn default_trend() -> bool {
    true
}
