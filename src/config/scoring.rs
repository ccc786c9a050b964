//! Scoring configuration for the screening heuristic
//!
//! Holds the per-metric weights, the substitution defaults used by the
//! validator, and the [`ScoringProfile`] that bundles them with the
//! threshold table.

use super::thresholds::ThresholdTable;
use crate::core::Metric;
use serde::{Deserialize, Serialize};

/// Weight of each metric in the aggregate score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_reading_speed_weight")]
    pub reading_speed: f64,

    #[serde(default = "default_fixation_duration_weight")]
    pub fixation_duration: f64,

    #[serde(default = "default_saccade_length_weight")]
    pub saccade_length: f64,

    #[serde(default = "default_phoneme_errors_weight")]
    pub phoneme_errors: f64,

    #[serde(default = "default_spelling_errors_weight")]
    pub spelling_errors: f64,

    #[serde(default = "default_comprehension_score_weight")]
    pub comprehension_score: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            reading_speed: default_reading_speed_weight(),
            fixation_duration: default_fixation_duration_weight(),
            saccade_length: default_saccade_length_weight(),
            phoneme_errors: default_phoneme_errors_weight(),
            spelling_errors: default_spelling_errors_weight(),
            comprehension_score: default_comprehension_score_weight(),
        }
    }
}

impl ScoringWeights {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::ReadingSpeed => self.reading_speed,
            Metric::FixationDuration => self.fixation_duration,
            Metric::SaccadeLength => self.saccade_length,
            Metric::PhonemeErrors => self.phoneme_errors,
            Metric::SpellingErrors => self.spelling_errors,
            Metric::ComprehensionScore => self.comprehension_score,
        }
    }

    // Pure function: Check if a weight is in valid range
    pub fn is_valid_weight(weight: f64) -> bool {
        (0.0..=1.0).contains(&weight)
    }

    // Pure function: Validate a single weight with name
    pub fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!("{} weight must be between 0.0 and 1.0", name))
        }
    }

    /// Sum in declaration order.
    pub fn sum(&self) -> f64 {
        Metric::ALL.into_iter().map(|m| self.get(m)).sum()
    }

    /// Validate that weights sum to 1.0 (with small tolerance for floating point)
    pub fn validate(&self) -> Result<(), String> {
        for metric in Metric::ALL {
            Self::validate_weight(self.get(metric), metric.display_name())?;
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > 0.001 {
            return Err(format!(
                "Scoring weights must sum to 1.0, but sum to {:.3}",
                sum
            ));
        }
        Ok(())
    }
}

pub fn default_reading_speed_weight() -> f64 {
    0.25
}
pub fn default_fixation_duration_weight() -> f64 {
    0.15
}
pub fn default_saccade_length_weight() -> f64 {
    0.15
}
pub fn default_phoneme_errors_weight() -> f64 {
    0.20
}
pub fn default_spelling_errors_weight() -> f64 {
    0.15
}
pub fn default_comprehension_score_weight() -> f64 {
    0.10
}

/// Values substituted for missing or unparseable upload fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDefaults {
    #[serde(default = "default_reading_speed")]
    pub reading_speed: f64,

    #[serde(default = "default_fixation_duration")]
    pub fixation_duration: f64,

    #[serde(default = "default_saccade_length")]
    pub saccade_length: f64,

    #[serde(default = "default_phoneme_errors")]
    pub phoneme_errors: f64,

    #[serde(default = "default_spelling_errors")]
    pub spelling_errors: f64,

    #[serde(default = "default_comprehension_score")]
    pub comprehension_score: f64,
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            reading_speed: default_reading_speed(),
            fixation_duration: default_fixation_duration(),
            saccade_length: default_saccade_length(),
            phoneme_errors: default_phoneme_errors(),
            spelling_errors: default_spelling_errors(),
            comprehension_score: default_comprehension_score(),
        }
    }
}

impl InputDefaults {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::ReadingSpeed => self.reading_speed,
            Metric::FixationDuration => self.fixation_duration,
            Metric::SaccadeLength => self.saccade_length,
            Metric::PhonemeErrors => self.phoneme_errors,
            Metric::SpellingErrors => self.spelling_errors,
            Metric::ComprehensionScore => self.comprehension_score,
        }
    }
}

fn default_reading_speed() -> f64 {
    Metric::ReadingSpeed.default_value()
}
fn default_fixation_duration() -> f64 {
    Metric::FixationDuration.default_value()
}
fn default_saccade_length() -> f64 {
    Metric::SaccadeLength.default_value()
}
fn default_phoneme_errors() -> f64 {
    Metric::PhonemeErrors.default_value()
}
fn default_spelling_errors() -> f64 {
    Metric::SpellingErrors.default_value()
}
fn default_comprehension_score() -> f64 {
    Metric::ComprehensionScore.default_value()
}

/// Everything the scorer and validator depend on, injectable as one value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringProfile {
    #[serde(default)]
    pub thresholds: ThresholdTable,

    #[serde(default)]
    pub weights: ScoringWeights,

    #[serde(default)]
    pub defaults: InputDefaults,
}

impl ScoringProfile {
    /// Check thresholds and weights. Defaults are not checked here; a
    /// non-finite default is caught when a record is built from it.
    pub fn validate(&self) -> Result<(), String> {
        self.thresholds.validate()?;
        self.weights.validate()
    }
}
