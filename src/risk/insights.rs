use super::RiskScorer;
use crate::core::{InputRecord, Metric, Prediction, RiskLevel, RiskResult};
use serde::{Deserialize, Serialize};

/// How much one metric adds to the weighted sum.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricContribution {
    pub metric: Metric,
    pub value: f64,
    pub level: RiskLevel,
    pub weight: f64,
    /// weight * score
    pub contribution: f64,
    /// Percentage of the weighted sum; 0 when nothing contributes.
    pub share: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub metric: Option<Metric>,
    pub level: Option<RiskLevel>,
    pub text: String,
}

/// Everything a renderer needs for one analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub record: InputRecord,
    pub result: RiskResult,
    pub contributions: Vec<MetricContribution>,
    pub recommendations: Vec<Recommendation>,
}

impl RiskReport {
    /// Contributions ordered largest first; ties keep declaration order.
    pub fn ranked_contributions(&self) -> Vec<&MetricContribution> {
        let mut ranked: Vec<_> = self.contributions.iter().collect();
        ranked.sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
        ranked
    }
}

pub fn calculate_contributions(
    scorer: &RiskScorer,
    record: &InputRecord,
    result: &RiskResult,
) -> Vec<MetricContribution> {
    let total = scorer.weighted_sum(&result.details);

    Metric::ALL
        .into_iter()
        .map(|metric| {
            let level = result.details.get(metric);
            let weight = scorer.profile().weights.get(metric);
            let contribution = weight * f64::from(level.score());
            let share = if total > 0.0 {
                contribution / total * 100.0
            } else {
                0.0
            };
            MetricContribution {
                metric,
                value: record.get(metric),
                level,
                weight,
                contribution,
                share,
            }
        })
        .collect()
}

fn high_risk_advice(metric: Metric) -> &'static str {
    match metric {
        Metric::ReadingSpeed => {
            "Reading speed is well below the expected range; consider structured fluency practice and a formal reading assessment."
        }
        Metric::FixationDuration => {
            "Fixations are unusually long; an eye-movement assessment is recommended."
        }
        Metric::SaccadeLength => {
            "Saccades are unusually short; tracking exercises and an eye-movement assessment are recommended."
        }
        Metric::PhonemeErrors => {
            "Frequent phoneme errors; targeted phonological awareness intervention is recommended."
        }
        Metric::SpellingErrors => {
            "Frequent spelling errors; consider a structured, multisensory spelling programme."
        }
        Metric::ComprehensionScore => {
            "Comprehension is low; guided reading with comprehension strategies is recommended."
        }
    }
}

fn monitoring_advice(metric: Metric) -> String {
    format!(
        "{} is borderline; monitor it and reassess in a few months.",
        metric.display_name()
    )
}

pub fn generate_recommendations(result: &RiskResult) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = result
        .details
        .iter()
        .filter_map(|(metric, level)| {
            let text = match level {
                RiskLevel::High => high_risk_advice(metric).to_string(),
                RiskLevel::Medium => monitoring_advice(metric),
                RiskLevel::Low => return None,
            };
            Some(Recommendation {
                metric: Some(metric),
                level: Some(level),
                text,
            })
        })
        .collect();

    // High before Medium; stable sort keeps declaration order within a level
    recommendations.sort_by(|a, b| b.level.cmp(&a.level));

    let summary = match result.prediction {
        Prediction::RiskDetected => {
            "Indicators of reading difficulty were found. This is a screening heuristic, not a diagnosis; refer for a professional assessment."
        }
        Prediction::LowRisk => {
            "No significant indicators of reading difficulty. Continue routine monitoring."
        }
    };
    recommendations.push(Recommendation {
        metric: None,
        level: None,
        text: summary.to_string(),
    });

    recommendations
}

pub fn generate_report(scorer: &RiskScorer, record: &InputRecord) -> RiskReport {
    let _span = tracing::debug_span!("generate_report").entered();

    let result = scorer.score(record);
    tracing::debug!(
        risk_score = result.risk_score,
        confidence = result.confidence,
        "scored record"
    );

    RiskReport {
        record: *record,
        contributions: calculate_contributions(scorer, record, &result),
        recommendations: generate_recommendations(&result),
        result,
    }
}
