use serde::{Deserialize, Serialize};

use super::scoring::{InputDefaults, ScoringProfile, ScoringWeights};
use super::thresholds::ThresholdTable;

/// Root configuration structure for dyscreen (`.dyscreen.toml`)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DyscreenConfig {
    /// Per-metric (low, high, direction) thresholds
    #[serde(default)]
    pub thresholds: Option<ThresholdTable>,

    /// Per-metric weights of the aggregate score
    #[serde(default)]
    pub weights: Option<ScoringWeights>,

    /// Substitution values for missing or unparseable upload fields
    #[serde(default)]
    pub defaults: Option<InputDefaults>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

impl DyscreenConfig {
    /// Assemble the scoring profile, filling absent sections with built-in values.
    pub fn profile(&self) -> ScoringProfile {
        ScoringProfile {
            thresholds: self.thresholds.clone().unwrap_or_default(),
            weights: self.weights.clone().unwrap_or_default(),
            defaults: self.defaults.clone().unwrap_or_default(),
        }
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output
            .as_ref()
            .and_then(|o| o.default_format.as_deref())
    }

    pub fn use_color(&self) -> Option<bool> {
        self.output.as_ref().and_then(|o| o.use_color)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    pub default_format: Option<String>,
    /// Enable colored output (default: auto-detect based on TTY)
    #[serde(default)]
    pub use_color: Option<bool>,
}
