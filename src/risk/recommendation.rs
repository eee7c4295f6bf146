use std::collections::BTreeMap;

use super::templates::RecommendationTemplates;
use super::types::{BandThresholds, DetailedRecommendation};
use crate::models::enums::RiskLevel;

pub const FALLBACK_ADVICE: &str = "No specific recommendations available.";

/// Maps condition scores to advice text through the template table.
/// Total over any condition key: unknown keys get [`FALLBACK_ADVICE`].
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    templates: RecommendationTemplates,
    thresholds: BandThresholds,
}

impl RecommendationEngine {
    pub fn new(templates: RecommendationTemplates, thresholds: BandThresholds) -> Self {
        Self {
            templates,
            thresholds,
        }
    }

    pub fn templates(&self) -> &RecommendationTemplates {
        &self.templates
    }

    pub fn risk_level(&self, score: f64) -> RiskLevel {
        self.thresholds.classify(score)
    }

    /// Condition key → joined advice text.
    pub fn recommend(&self, scores: &BTreeMap<String, f64>) -> BTreeMap<String, String> {
        scores
            .iter()
            .map(|(condition, score)| (condition.clone(), self.advice_for(condition, *score)))
            .collect()
    }

    fn advice_for(&self, condition: &str, score: f64) -> String {
        match self.templates.lookup(condition, self.risk_level(score)) {
            Some(actions) => actions.join(" "),
            None => {
                tracing::warn!(condition, "No recommendation template for condition");
                FALLBACK_ADVICE.to_string()
            }
        }
    }

    /// Advice, action list, priority and confidence per condition, in key order.
    pub fn recommend_detailed(
        &self,
        scores: &BTreeMap<String, f64>,
    ) -> Vec<DetailedRecommendation> {
        scores
            .iter()
            .map(|(condition, &score)| {
                let level = self.risk_level(score);
                let (advice, actions) = match self.templates.lookup(condition, level) {
                    Some(actions) => (actions.join(" "), actions.to_vec()),
                    None => (FALLBACK_ADVICE.to_string(), Vec::new()),
                };
                DetailedRecommendation {
                    condition: condition.clone(),
                    risk_level: level,
                    score,
                    advice,
                    actions,
                    priority: level.priority(),
                    confidence: confidence_for(score),
                }
            })
            .collect()
    }

    pub fn confidence_levels(&self, scores: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
        scores
            .iter()
            .map(|(condition, &score)| (condition.clone(), confidence_for(score)))
            .collect()
    }
}

/// Extreme scores sit far from a band edge, so the band is less ambiguous.
/// Not a statistical estimate.
pub fn confidence_for(score: f64) -> f64 {
    if score >= 70.0 || score <= 20.0 {
        95.0
    } else if score >= 50.0 || score <= 40.0 {
        85.0
    } else {
        75.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::Priority;

    fn engine() -> RecommendationEngine {
        RecommendationEngine::new(
            RecommendationTemplates::bundled().unwrap(),
            BandThresholds::default(),
        )
    }

    fn scores(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn hypertension_high_band_template() {
        let engine = engine();
        let recs = engine.recommend(&scores(&[("Hypertension", 69.0)]));
        let expected = engine
            .templates()
            .lookup("hypertension", RiskLevel::High)
            .unwrap()
            .join(" ");
        assert_eq!(recs["Hypertension"], expected);

        let moderate = engine
            .templates()
            .lookup("hypertension", RiskLevel::Moderate)
            .unwrap()
            .join(" ");
        assert_ne!(recs["Hypertension"], moderate);
    }

    #[test]
    fn band_edges_select_templates() {
        let engine = engine();
        let t = engine.templates();
        let recs = engine.recommend(&scores(&[
            ("diabetes", 29.0),
            ("heart_disease", 30.0),
            ("hypertension", 59.0),
            ("high_cholesterol", 60.0),
        ]));
        assert_eq!(recs["diabetes"], t.lookup("diabetes", RiskLevel::Low).unwrap().join(" "));
        assert_eq!(
            recs["heart_disease"],
            t.lookup("heart_disease", RiskLevel::Moderate).unwrap().join(" ")
        );
        assert_eq!(
            recs["hypertension"],
            t.lookup("hypertension", RiskLevel::Moderate).unwrap().join(" ")
        );
        assert_eq!(
            recs["high_cholesterol"],
            t.lookup("high_cholesterol", RiskLevel::High).unwrap().join(" ")
        );
    }

    #[test]
    fn unknown_condition_gets_fallback() {
        let engine = engine();
        let recs = engine.recommend(&scores(&[("Asthma", 80.0), ("", 10.0)]));
        assert_eq!(recs["Asthma"], FALLBACK_ADVICE);
        assert_eq!(recs[""], FALLBACK_ADVICE);

        let detailed = engine.recommend_detailed(&scores(&[("Asthma", 80.0)]));
        assert_eq!(detailed[0].advice, FALLBACK_ADVICE);
        assert!(detailed[0].actions.is_empty());
        assert_eq!(detailed[0].priority, Priority::High);
    }

    #[test]
    fn recommending_twice_is_byte_identical() {
        let engine = engine();
        let input = scores(&[("Diabetes", 58.0), ("Hypertension", 69.0), ("Lupus", 3.0)]);
        let first = serde_json::to_string(&engine.recommend(&input)).unwrap();
        let second = serde_json::to_string(&engine.recommend(&input)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn detailed_mode_returns_action_list() {
        let engine = engine();
        let detailed = engine.recommend_detailed(&scores(&[("Diabetes", 58.0)]));
        let d = &detailed[0];
        assert_eq!(d.risk_level, RiskLevel::Moderate);
        assert_eq!(d.priority, Priority::Medium);
        assert_eq!(d.confidence, 85.0);
        assert_eq!(d.actions.len(), 5);
        assert_eq!(d.advice, d.actions.join(" "));
    }

    #[test]
    fn confidence_heuristic() {
        assert_eq!(confidence_for(95.0), 95.0);
        assert_eq!(confidence_for(70.0), 95.0);
        assert_eq!(confidence_for(20.0), 95.0);
        assert_eq!(confidence_for(55.0), 85.0);
        assert_eq!(confidence_for(35.0), 85.0);
        assert_eq!(confidence_for(45.0), 75.0);

        let engine = engine();
        let levels = engine.confidence_levels(&scores(&[("a", 10.0), ("b", 45.0)]));
        assert_eq!(levels["a"], 95.0);
        assert_eq!(levels["b"], 75.0);
    }

    #[test]
    fn alternate_thresholds() {
        let engine = RecommendationEngine::new(
            RecommendationTemplates::bundled().unwrap(),
            BandThresholds::new(40.0, 70.0).unwrap(),
        );
        assert_eq!(engine.risk_level(69.0), RiskLevel::Moderate);
        assert_eq!(engine.risk_level(39.0), RiskLevel::Low);
    }
}
