use super::helpers::round_and_clamp;
use super::messages::ExplanationTemplates;
use super::scoring::{
    score_diabetes, score_heart_disease, score_high_cholesterol, score_hypertension,
    ConditionScore,
};
use super::types::{BandThresholds, RiskPredictor, RiskScore, RiskScoreSet};
use crate::models::enums::Condition;
use crate::models::HealthMetrics;

/// Rule-based predictor over the categorical lifestyle descriptors.
/// Stateless apart from the band thresholds used for explanations.
#[derive(Debug, Clone, Default)]
pub struct DefaultRiskPredictor {
    thresholds: BandThresholds,
}

impl DefaultRiskPredictor {
    pub fn new(thresholds: BandThresholds) -> Self {
        Self { thresholds }
    }

    fn finalize(&self, condition: Condition, raw: ConditionScore, bmi: f64) -> RiskScore {
        let score = round_and_clamp(raw.raw);
        let level = self.thresholds.classify(f64::from(score));
        let explanation =
            ExplanationTemplates::explain(condition, level, &raw.factors, &raw.protective, bmi);

        tracing::debug!(
            condition = condition.as_str(),
            raw = raw.raw,
            score,
            level = level.as_str(),
            "Scored condition"
        );

        RiskScore {
            condition,
            score,
            level,
            explanation,
            factors: raw.factors,
        }
    }
}

impl RiskPredictor for DefaultRiskPredictor {
    fn predict(&self, metrics: &HealthMetrics) -> RiskScoreSet {
        let bmi = metrics.bmi();

        RiskScoreSet {
            diabetes: self.finalize(Condition::Diabetes, score_diabetes(metrics, bmi), bmi),
            heart_disease: self.finalize(
                Condition::HeartDisease,
                score_heart_disease(metrics, bmi),
                bmi,
            ),
            hypertension: self.finalize(
                Condition::Hypertension,
                score_hypertension(metrics, bmi),
                bmi,
            ),
            high_cholesterol: self.finalize(
                Condition::HighCholesterol,
                score_high_cholesterol(metrics, bmi),
                bmi,
            ),
        }
    }
}
