pub mod insights;

use crate::config::ScoringProfile;
use crate::core::{InputRecord, Metric, Prediction, RiskDetails, RiskLevel, RiskResult};
use crate::errors::Result;
use crate::input;

/// Upper end of the risk score scale.
pub const MAX_RISK_SCORE: f64 = 10.0;
/// Scores at or above this are classified as risk detected.
pub const DECISION_BOUNDARY: f64 = 5.0;

/// Risk scores are rounded to this many steps per unit, so a weight sum of
/// 0.9999999999999999 lands on the intended value.
const SCORE_PRECISION: f64 = 1e9;

/// Maps a validated record to a [`RiskResult`]. Holds only its profile.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    profile: ScoringProfile,
}

impl RiskScorer {
    pub fn new(profile: ScoringProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    pub fn assess_metric(&self, metric: Metric, value: f64) -> RiskLevel {
        self.profile.thresholds.get(metric).assess(value)
    }

    pub fn assess(&self, record: &InputRecord) -> RiskDetails {
        RiskDetails::from_fn(|m| self.assess_metric(m, record.get(m)))
    }

    /// Weighted sum of per-metric scores, accumulated in declaration order.
    pub fn weighted_sum(&self, details: &RiskDetails) -> f64 {
        details.iter().fold(0.0, |acc, (metric, level)| {
            acc + self.profile.weights.get(metric) * f64::from(level.score())
        })
    }

    pub fn calculate_risk_score(&self, details: &RiskDetails) -> f64 {
        let raw = self.weighted_sum(details) / 2.0 * MAX_RISK_SCORE;
        let rounded = (raw * SCORE_PRECISION).round() / SCORE_PRECISION;
        rounded.clamp(0.0, MAX_RISK_SCORE)
    }

    pub fn score(&self, record: &InputRecord) -> RiskResult {
        let details = self.assess(record);
        let risk_score = self.calculate_risk_score(&details);

        RiskResult {
            prediction: classify(risk_score),
            risk_score,
            confidence: confidence(risk_score),
            details,
        }
    }

    /// Validate an upload and score it. Validation failures propagate.
    pub fn analyze_upload(&self, text: &str) -> Result<RiskResult> {
        let record = input::parse_upload(text, &self.profile.defaults)?;
        Ok(self.score(&record))
    }
}

pub fn classify(risk_score: f64) -> Prediction {
    if risk_score >= DECISION_BOUNDARY {
        Prediction::RiskDetected
    } else {
        Prediction::LowRisk
    }
}

/// Peaks at 100 on the decision boundary and falls linearly to 0 at either
/// end of the scale. Measures distance from the boundary, not accuracy.
pub fn confidence(risk_score: f64) -> f64 {
    let distance = (DECISION_BOUNDARY - risk_score).abs() / DECISION_BOUNDARY;
    ((1.0 - distance) * 100.0).clamp(0.0, 100.0)
}
