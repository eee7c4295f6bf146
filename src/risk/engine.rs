use chrono::SubsecRound;
use rusqlite::Connection;
use uuid::Uuid;

use super::predictor::DefaultRiskPredictor;
use super::recommendation::RecommendationEngine;
use super::templates::RecommendationTemplates;
use super::types::{Assessment, AssessmentError, OverallRisk, RiskPredictor};
use super::validation::validate_metrics;
use crate::config::Settings;
use crate::db;
use crate::models::{HealthMetrics, HealthMetricsInput};

/// Runs a submission through validation, prediction and recommendation.
/// Built once and shared; holds no per-request state.
pub struct AssessmentService {
    predictor: Box<dyn RiskPredictor>,
    recommender: RecommendationEngine,
}

impl AssessmentService {
    pub fn new(predictor: Box<dyn RiskPredictor>, recommender: RecommendationEngine) -> Self {
        Self {
            predictor,
            recommender,
        }
    }

    /// Bundled templates and default band thresholds.
    pub fn with_defaults() -> Result<Self, AssessmentError> {
        Self::from_settings(&Settings::default())
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, AssessmentError> {
        let templates = match &settings.templates_path {
            Some(path) => RecommendationTemplates::load(path)?,
            None => RecommendationTemplates::bundled()?,
        };
        Ok(Self::new(
            Box::new(DefaultRiskPredictor::new(settings.thresholds)),
            RecommendationEngine::new(templates, settings.thresholds),
        ))
    }

    pub fn recommender(&self) -> &RecommendationEngine {
        &self.recommender
    }

    /// Validate the raw input and evaluate it.
    pub fn assess(&self, input: &HealthMetricsInput) -> Result<Assessment, AssessmentError> {
        let metrics = validate_metrics(input).map_err(|e| {
            tracing::warn!(error = %e, "Metrics rejected");
            e
        })?;
        Ok(self.assess_metrics(metrics))
    }

    /// Evaluate already-validated metrics.
    pub fn assess_metrics(&self, metrics: HealthMetrics) -> Assessment {
        let scores = self.predictor.predict(&metrics);
        let score_map = scores.score_map();
        let recommendations = self.recommender.recommend(&score_map);
        let detailed = self.recommender.recommend_detailed(&score_map);

        let average_score = scores.average();
        let overall = OverallRisk {
            average_score,
            level: self.recommender.risk_level(average_score),
        };

        tracing::info!(
            diabetes = scores.diabetes.score,
            heart_disease = scores.heart_disease.score,
            hypertension = scores.hypertension.score,
            high_cholesterol = scores.high_cholesterol.score,
            overall = overall.level.as_str(),
            "Assessment completed"
        );

        Assessment {
            bmi: metrics.bmi(),
            metrics,
            scores,
            recommendations,
            detailed,
            overall,
            assessed_at: chrono::Local::now().naive_local().trunc_subsecs(0),
        }
    }

    /// Assess and persist for a patient. Nothing is written when the
    /// input is rejected.
    pub fn submit(
        &self,
        conn: &Connection,
        patient_id: &str,
        input: &HealthMetricsInput,
    ) -> Result<(Uuid, Assessment), AssessmentError> {
        let assessment = self.assess(input)?;
        let id = db::insert_assessment(conn, patient_id, &assessment)?;
        tracing::info!(assessment_id = %id, patient_id, "Assessment stored");
        Ok((id, assessment))
    }
}
