use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::validation::ValidationError;
use crate::db::DatabaseError;
use crate::models::enums::{Condition, Priority, RiskLevel};
use crate::models::HealthMetrics;

// ---------------------------------------------------------------------------
// BandThresholds
// ---------------------------------------------------------------------------

/// Score boundaries between the Low, Moderate and High bands.
/// A score below `moderate` is Low; a score at or above `high` is High.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandThresholds {
    pub moderate: f64,
    pub high: f64,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            moderate: 30.0,
            high: 60.0,
        }
    }
}

impl BandThresholds {
    pub fn new(moderate: f64, high: f64) -> Result<Self, AssessmentError> {
        if !(0.0..=100.0).contains(&moderate) || !(0.0..=100.0).contains(&high) || moderate >= high
        {
            return Err(AssessmentError::InvalidThresholds { moderate, high });
        }
        Ok(Self { moderate, high })
    }

    pub fn classify(&self, score: f64) -> RiskLevel {
        if score < self.moderate {
            RiskLevel::Low
        } else if score < self.high {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }
}

// ---------------------------------------------------------------------------
// RiskScore & RiskScoreSet
// ---------------------------------------------------------------------------

/// Final score for one condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    pub condition: Condition,
    /// Rounded and clamped to 0..=100.
    pub score: u8,
    pub level: RiskLevel,
    pub explanation: String,
    pub factors: Vec<String>,
}

/// Scores for the fixed four-condition set. One field per condition, so a
/// partial result cannot be represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScoreSet {
    pub diabetes: RiskScore,
    pub heart_disease: RiskScore,
    pub hypertension: RiskScore,
    pub high_cholesterol: RiskScore,
}

impl RiskScoreSet {
    pub fn get(&self, condition: Condition) -> &RiskScore {
        match condition {
            Condition::Diabetes => &self.diabetes,
            Condition::HeartDisease => &self.heart_disease,
            Condition::Hypertension => &self.hypertension,
            Condition::HighCholesterol => &self.high_cholesterol,
        }
    }

    /// Scores in `Condition::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = &RiskScore> {
        Condition::ALL.iter().map(move |c| self.get(*c))
    }

    /// Condition key ("Heart_Disease") to score, the shape the
    /// recommendation engine consumes.
    pub fn score_map(&self) -> BTreeMap<String, f64> {
        self.iter()
            .map(|s| (s.condition.as_str().to_string(), f64::from(s.score)))
            .collect()
    }

    /// Mean of the four scores.
    pub fn average(&self) -> f64 {
        let total: f64 = self.iter().map(|s| f64::from(s.score)).sum();
        total / Condition::ALL.len() as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallRisk {
    pub average_score: f64,
    pub level: RiskLevel,
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedRecommendation {
    pub condition: String,
    pub risk_level: RiskLevel,
    pub score: f64,
    pub advice: String,
    pub actions: Vec<String>,
    pub priority: Priority,
    /// How unambiguous the band assignment is (75, 85 or 95).
    pub confidence: f64,
}

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

/// One complete evaluation of a metrics submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub metrics: HealthMetrics,
    pub bmi: f64,
    pub scores: RiskScoreSet,
    pub recommendations: BTreeMap<String, String>,
    pub detailed: Vec<DetailedRecommendation>,
    pub overall: OverallRisk,
    pub assessed_at: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// AssessmentError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum AssessmentError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Template load failed ({0}): {1}")]
    TemplateLoad(String, String),

    #[error("Template parse failed ({0}): {1}")]
    TemplateParse(String, String),

    #[error("Template table incomplete: {condition} has no {level} advice")]
    TemplateIncomplete { condition: String, level: String },

    #[error("Invalid band thresholds: moderate {moderate}, high {high}")]
    InvalidThresholds { moderate: f64, high: f64 },

    #[error("Invalid setting {key}: {value}")]
    InvalidSetting { key: String, value: String },
}

// ---------------------------------------------------------------------------
// RiskPredictor trait
// ---------------------------------------------------------------------------

/// Scores validated metrics for every tracked condition.
pub trait RiskPredictor: Send + Sync {
    fn predict(&self, metrics: &HealthMetrics) -> RiskScoreSet;
}
