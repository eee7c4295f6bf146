use serde::{Deserialize, Serialize};

use super::enums::{AlcoholUse, DietQuality, ExerciseFrequency, SmokingStatus};
use crate::risk::validation::{validate_metrics, ValidationError};

/// A parsed blood pressure reading in mmHg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: i32,
    pub diastolic: i32,
}

impl std::fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

/// Blood pressure as supplied by the input layer: either the
/// "systolic/diastolic" form string or two integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BloodPressureInput {
    Reading(String),
    Pair { systolic: i32, diastolic: i32 },
}

impl From<&str> for BloodPressureInput {
    fn from(s: &str) -> Self {
        Self::Reading(s.to_string())
    }
}

/// Categorical lifestyle descriptors used by the scorers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifestyleProfile {
    pub exercise: ExerciseFrequency,
    pub smoking: SmokingStatus,
    pub diet: DietQuality,
    pub alcohol: Option<AlcoholUse>,
}

impl Default for LifestyleProfile {
    /// Descriptors that contribute nothing to any score.
    fn default() -> Self {
        Self {
            exercise: ExerciseFrequency::Rarely,
            smoking: SmokingStatus::No,
            diet: DietQuality::Good,
            alcohol: None,
        }
    }
}

/// Lifestyle as supplied by the input layer: dropdown values or a
/// free-text description ("Exercise: 2x/week, Smoking: No, ...").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LifestyleInput {
    Structured {
        exercise: String,
        smoking: String,
        diet: String,
        #[serde(default)]
        alcohol: Option<String>,
    },
    FreeText(String),
}

/// Raw health metrics before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetricsInput {
    pub age: i64,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub blood_pressure: BloodPressureInput,
    pub cholesterol_mg_dl: f64,
    pub glucose_mg_dl: f64,
    pub lifestyle: LifestyleInput,
}

/// Validated health metrics. Only obtainable through [`validate_metrics`],
/// so every value is inside its plausible range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HealthMetricsInput")]
pub struct HealthMetrics {
    age: u32,
    weight_kg: f64,
    height_cm: f64,
    blood_pressure: BloodPressure,
    cholesterol_mg_dl: f64,
    glucose_mg_dl: f64,
    lifestyle: LifestyleProfile,
}

impl HealthMetrics {
    pub(crate) fn from_validated(
        age: u32,
        weight_kg: f64,
        height_cm: f64,
        blood_pressure: BloodPressure,
        cholesterol_mg_dl: f64,
        glucose_mg_dl: f64,
        lifestyle: LifestyleProfile,
    ) -> Self {
        Self {
            age,
            weight_kg,
            height_cm,
            blood_pressure,
            cholesterol_mg_dl,
            glucose_mg_dl,
            lifestyle,
        }
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn blood_pressure(&self) -> BloodPressure {
        self.blood_pressure
    }

    pub fn cholesterol_mg_dl(&self) -> f64 {
        self.cholesterol_mg_dl
    }

    pub fn glucose_mg_dl(&self) -> f64 {
        self.glucose_mg_dl
    }

    pub fn lifestyle(&self) -> &LifestyleProfile {
        &self.lifestyle
    }

    /// Body Mass Index: weight (kg) / height (m)².
    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        self.weight_kg / (height_m * height_m)
    }
}

impl TryFrom<HealthMetricsInput> for HealthMetrics {
    type Error = ValidationError;

    fn try_from(input: HealthMetricsInput) -> Result<Self, Self::Error> {
        validate_metrics(&input)
    }
}

impl TryFrom<&HealthMetricsInput> for HealthMetrics {
    type Error = ValidationError;

    fn try_from(input: &HealthMetricsInput) -> Result<Self, Self::Error> {
        validate_metrics(input)
    }
}
