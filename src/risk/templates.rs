use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::types::AssessmentError;
use crate::models::enums::RiskLevel;

const BUNDLED_TEMPLATES: &str = include_str!("../../resources/recommendation_templates.json");

/// Advice lists for one condition, one per band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandTemplates {
    #[serde(rename = "Low")]
    pub low: Vec<String>,
    #[serde(rename = "Moderate")]
    pub moderate: Vec<String>,
    #[serde(rename = "High")]
    pub high: Vec<String>,
}

impl BandTemplates {
    pub fn for_level(&self, level: RiskLevel) -> &[String] {
        match level {
            RiskLevel::Low => &self.low,
            RiskLevel::Moderate => &self.moderate,
            RiskLevel::High => &self.high,
        }
    }
}

/// Versioned condition × band → advice table (recommendation_templates.json).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationTemplates {
    pub version: String,
    pub conditions: BTreeMap<String, BandTemplates>,
}

impl RecommendationTemplates {
    /// The table compiled into the crate.
    pub fn bundled() -> Result<Self, AssessmentError> {
        Self::from_json("recommendation_templates.json", BUNDLED_TEMPLATES)
    }

    /// Load a replacement table from disk.
    pub fn load(path: &Path) -> Result<Self, AssessmentError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AssessmentError::TemplateLoad(path.display().to_string(), e.to_string())
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_json(&name, &json)
    }

    pub fn from_json(name: &str, json: &str) -> Result<Self, AssessmentError> {
        let parsed: RecommendationTemplates = serde_json::from_str(json)
            .map_err(|e| AssessmentError::TemplateParse(name.into(), e.to_string()))?;

        let mut conditions = BTreeMap::new();
        for (key, bands) in parsed.conditions {
            for level in RiskLevel::ALL {
                if bands.for_level(*level).is_empty() {
                    return Err(AssessmentError::TemplateIncomplete {
                        condition: key,
                        level: level.as_str().into(),
                    });
                }
            }
            conditions.insert(key.to_ascii_lowercase(), bands);
        }

        tracing::debug!(
            name,
            version = %parsed.version,
            conditions = conditions.len(),
            "Loaded recommendation templates"
        );

        Ok(Self {
            version: parsed.version,
            conditions,
        })
    }

    /// Advice for a condition key ("Heart_Disease" or "heart_disease").
    pub fn lookup(&self, condition: &str, level: RiskLevel) -> Option<&[String]> {
        self.conditions
            .get(&condition.trim().to_ascii_lowercase())
            .map(|bands| bands.for_level(level))
    }
}
