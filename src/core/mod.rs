pub mod metrics;

pub use metrics::Metric;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One screening record. Exists for the duration of a single analysis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub reading_speed: f64,
    pub fixation_duration: f64,
    pub saccade_length: f64,
    pub phoneme_errors: f64,
    pub spelling_errors: f64,
    pub comprehension_score: f64,
}

impl Default for InputRecord {
    fn default() -> Self {
        Self::from_fn(Metric::default_value)
    }
}

impl InputRecord {
    /// Build a record from values in declaration order.
    pub fn new(values: [f64; 6]) -> Self {
        Self::from_fn(|m| values[m as usize])
    }

    pub fn from_fn(mut f: impl FnMut(Metric) -> f64) -> Self {
        Self {
            reading_speed: f(Metric::ReadingSpeed),
            fixation_duration: f(Metric::FixationDuration),
            saccade_length: f(Metric::SaccadeLength),
            phoneme_errors: f(Metric::PhonemeErrors),
            spelling_errors: f(Metric::SpellingErrors),
            comprehension_score: f(Metric::ComprehensionScore),
        }
    }

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

    pub fn values(&self) -> [f64; 6] {
        Metric::ALL.map(|m| self.get(m))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    /// First field (in declaration order) that is NaN or infinite.
    pub fn first_non_finite(&self) -> Option<Metric> {
        self.iter().find(|(_, v)| !v.is_finite()).map(|(m, _)| m)
    }
}

/// Per-metric risk label. The numeric score is the same comparison seen as a number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn score(self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
        }
    }

    pub fn from_score(score: u8) -> Option<Self> {
        match score {
            0 => Some(RiskLevel::Low),
            1 => Some(RiskLevel::Medium),
            2 => Some(RiskLevel::High),
            _ => None,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDetails {
    pub reading_speed: RiskLevel,
    pub fixation_duration: RiskLevel,
    pub saccade_length: RiskLevel,
    pub phoneme_errors: RiskLevel,
    pub spelling_errors: RiskLevel,
    pub comprehension_score: RiskLevel,
}

impl RiskDetails {
    pub fn from_fn(mut f: impl FnMut(Metric) -> RiskLevel) -> Self {
        Self {
            reading_speed: f(Metric::ReadingSpeed),
            fixation_duration: f(Metric::FixationDuration),
            saccade_length: f(Metric::SaccadeLength),
            phoneme_errors: f(Metric::PhonemeErrors),
            spelling_errors: f(Metric::SpellingErrors),
            comprehension_score: f(Metric::ComprehensionScore),
        }
    }

    pub fn get(&self, metric: Metric) -> RiskLevel {
        match metric {
            Metric::ReadingSpeed => self.reading_speed,
            Metric::FixationDuration => self.fixation_duration,
            Metric::SaccadeLength => self.saccade_length,
            Metric::PhonemeErrors => self.phoneme_errors,
            Metric::SpellingErrors => self.spelling_errors,
            Metric::ComprehensionScore => self.comprehension_score,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, RiskLevel)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    pub fn count(&self, level: RiskLevel) -> usize {
        self.iter().filter(|(_, l)| *l == level).count()
    }
}

/// Binary classification; serialised as `0` / `1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prediction {
    LowRisk,
    RiskDetected,
}

impl Prediction {
    pub fn as_u8(self) -> u8 {
        match self {
            Prediction::LowRisk => 0,
            Prediction::RiskDetected => 1,
        }
    }

    pub fn is_risk(self) -> bool {
        matches!(self, Prediction::RiskDetected)
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::LowRisk => f.write_str("Low risk"),
            Prediction::RiskDetected => f.write_str("Risk detected"),
        }
    }
}

impl Serialize for Prediction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for Prediction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(Prediction::LowRisk),
            1 => Ok(Prediction::RiskDetected),
            other => Err(serde::de::Error::custom(format!(
                "prediction must be 0 or 1, got {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub prediction: Prediction,
    /// Heuristic score in [0, 10]
    pub risk_score: f64,
    /// Distance-from-boundary measure in [0, 100]
    pub confidence: f64,
    pub details: RiskDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_matches_metric_defaults() {
        let record = InputRecord::default();
        assert_eq!(record.values(), [60.0, 350.0, 30.0, 10.0, 7.0, 70.0]);
    }

    #[test]
    fn test_new_preserves_declaration_order() {
        let record = InputRecord::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(record.saccade_length, 3.0);
        assert_eq!(record.comprehension_score, 6.0);
    }

    #[test]
    fn test_first_non_finite() {
        let mut record = InputRecord::default();
        assert_eq!(record.first_non_finite(), None);
        record.spelling_errors = f64::NAN;
        assert_eq!(record.first_non_finite(), Some(Metric::SpellingErrors));
    }

    #[test]
    fn test_risk_level_score_roundtrip() {
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            assert_eq!(RiskLevel::from_score(level.score()), Some(level));
        }
        assert_eq!(RiskLevel::from_score(3), None);
    }

    #[test]
    fn test_prediction_serializes_as_number() {
        let json = serde_json::to_string(&Prediction::RiskDetected).unwrap();
        assert_eq!(json, "1");
        let back: Prediction = serde_json::from_str("0").unwrap();
        assert_eq!(back, Prediction::LowRisk);
        assert!(serde_json::from_str::<Prediction>("2").is_err());
    }

    #[test]
    fn test_details_count() {
        let details = RiskDetails::from_fn(|m| match m {
            Metric::ReadingSpeed | Metric::PhonemeErrors => RiskLevel::High,
            _ => RiskLevel::Low,
        });
        assert_eq!(details.count(RiskLevel::High), 2);
        assert_eq!(details.count(RiskLevel::Low), 4);
        assert_eq!(details.count(RiskLevel::Medium), 0);
    }
}
