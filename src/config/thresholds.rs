use crate::core::{Metric, RiskLevel};
use serde::{Deserialize, Serialize};

/// Which side of the thresholds indicates risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskDirection {
    /// Values below the thresholds are risky (e.g. reading speed)
    LowIsRisk,
    /// Values above the thresholds are risky (e.g. error counts)
    HighIsRisk,
}

/// A (low, high) threshold pair with its risk direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldThreshold {
    pub low: f64,
    pub high: f64,
    pub direction: RiskDirection,
}

impl FieldThreshold {
    pub const fn new(low: f64, high: f64, direction: RiskDirection) -> Self {
        Self {
            low,
            high,
            direction,
        }
    }

    /// Single comparison behind both the numeric score and the label.
    pub fn assess(&self, value: f64) -> RiskLevel {
        match self.direction {
            RiskDirection::LowIsRisk if value < self.low => RiskLevel::High,
            RiskDirection::LowIsRisk if value < self.high => RiskLevel::Medium,
            RiskDirection::HighIsRisk if value > self.high => RiskLevel::High,
            RiskDirection::HighIsRisk if value > self.low => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn validate(&self, name: &str) -> Result<(), String> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(format!("{name} thresholds must be finite numbers"));
        }
        if self.low > self.high {
            return Err(format!(
                "{name} low threshold ({}) must not exceed high threshold ({})",
                self.low, self.high
            ));
        }
        Ok(())
    }
}

/// Per-metric threshold table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    #[serde(default = "default_reading_speed_threshold")]
    pub reading_speed: FieldThreshold,

    #[serde(default = "default_fixation_duration_threshold")]
    pub fixation_duration: FieldThreshold,

    #[serde(default = "default_saccade_length_threshold")]
    pub saccade_length: FieldThreshold,

    #[serde(default = "default_phoneme_errors_threshold")]
    pub phoneme_errors: FieldThreshold,

    #[serde(default = "default_spelling_errors_threshold")]
    pub spelling_errors: FieldThreshold,

    #[serde(default = "default_comprehension_score_threshold")]
    pub comprehension_score: FieldThreshold,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            reading_speed: default_reading_speed_threshold(),
            fixation_duration: default_fixation_duration_threshold(),
            saccade_length: default_saccade_length_threshold(),
            phoneme_errors: default_phoneme_errors_threshold(),
            spelling_errors: default_spelling_errors_threshold(),
            comprehension_score: default_comprehension_score_threshold(),
        }
    }
}

impl ThresholdTable {
    pub fn get(&self, metric: Metric) -> &FieldThreshold {
        match metric {
            Metric::ReadingSpeed => &self.reading_speed,
            Metric::FixationDuration => &self.fixation_duration,
            Metric::SaccadeLength => &self.saccade_length,
            Metric::PhonemeErrors => &self.phoneme_errors,
            Metric::SpellingErrors => &self.spelling_errors,
            Metric::ComprehensionScore => &self.comprehension_score,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        Metric::ALL
            .into_iter()
            .try_for_each(|m| self.get(m).validate(m.display_name()))
    }
}

pub fn default_reading_speed_threshold() -> FieldThreshold {
    FieldThreshold::new(50.0, 80.0, RiskDirection::LowIsRisk)
}
pub fn default_fixation_duration_threshold() -> FieldThreshold {
    FieldThreshold::new(300.0, 400.0, RiskDirection::HighIsRisk)
}
pub fn default_saccade_length_threshold() -> FieldThreshold {
    FieldThreshold::new(20.0, 35.0, RiskDirection::LowIsRisk)
}
pub fn default_phoneme_errors_threshold() -> FieldThreshold {
    FieldThreshold::new(8.0, 12.0, RiskDirection::HighIsRisk)
}
pub fn default_spelling_errors_threshold() -> FieldThreshold {
    FieldThreshold::new(5.0, 10.0, RiskDirection::HighIsRisk)
}
pub fn default_comprehension_score_threshold() -> FieldThreshold {
    FieldThreshold::new(60.0, 80.0, RiskDirection::LowIsRisk)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_is_risk_boundaries() {
        let t = default_reading_speed_threshold();
        assert_eq!(t.assess(49.9), RiskLevel::High);
        // Boundaries are strict: equal to low is not below it
        assert_eq!(t.assess(50.0), RiskLevel::Medium);
        assert_eq!(t.assess(79.9), RiskLevel::Medium);
        assert_eq!(t.assess(80.0), RiskLevel::Low);
    }

    #[test]
    fn test_high_is_risk_boundaries() {
        let t = default_fixation_duration_threshold();
        assert_eq!(t.assess(300.0), RiskLevel::Low);
        assert_eq!(t.assess(300.1), RiskLevel::Medium);
        assert_eq!(t.assess(400.0), RiskLevel::Medium);
        assert_eq!(t.assess(400.1), RiskLevel::High);
    }

    #[test]
    fn test_validate_rejects_inverted_pair() {
        let t = FieldThreshold::new(10.0, 5.0, RiskDirection::HighIsRisk);
        let err = t.validate("Spelling Errors").unwrap_err();
        assert!(err.contains("Spelling Errors"));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let t = FieldThreshold::new(f64::NAN, 5.0, RiskDirection::LowIsRisk);
        assert!(t.validate("x").is_err());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let table: ThresholdTable = toml::from_str(
            r#"
            [reading_speed]
            low = 40.0
            high = 70.0
            direction = "low_is_risk"
            "#,
        )
        .unwrap();
        assert_eq!(table.reading_speed.low, 40.0);
        assert_eq!(table.saccade_length, default_saccade_length_threshold());
    }
}
