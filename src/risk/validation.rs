//! Range and format checks for submitted health metrics.
//!
//! Checks run in a fixed order (age, weight, height, cholesterol, glucose,
//! blood pressure, lifestyle) and stop at the first violation.

use std::ops::RangeInclusive;

use thiserror::Error;

use super::lifestyle::parse_free_text_lifestyle;
use crate::models::enums::{AlcoholUse, DietQuality, ExerciseFrequency, SmokingStatus};
use crate::models::{
    BloodPressure, BloodPressureInput, HealthMetrics, HealthMetricsInput, LifestyleInput,
    LifestyleProfile,
};

pub const AGE_RANGE: RangeInclusive<i64> = 0..=120;
pub const WEIGHT_KG_RANGE: RangeInclusive<f64> = 20.0..=500.0;
pub const HEIGHT_CM_RANGE: RangeInclusive<f64> = 50.0..=300.0;
pub const CHOLESTEROL_RANGE: RangeInclusive<f64> = 0.0..=500.0;
pub const GLUCOSE_RANGE: RangeInclusive<f64> = 50.0..=250.0;
pub const SYSTOLIC_RANGE: RangeInclusive<i32> = 50..=250;
pub const DIASTOLIC_RANGE: RangeInclusive<i32> = 30..=150;
pub const MIN_LIFESTYLE_TEXT_CHARS: usize = 10;

/// A rejected submission. The message is shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Age must be between 0 and 120 years")]
    Age(i64),

    #[error("Weight must be between 20 and 500 kg")]
    Weight(f64),

    #[error("Height must be between 50 and 300 cm")]
    Height(f64),

    #[error("Cholesterol level must be between 0 and 500 mg/dL")]
    Cholesterol(f64),

    #[error("Glucose level must be between 50 and 250 mg/dL")]
    Glucose(f64),

    #[error("Blood pressure must be in format 'systolic/diastolic'")]
    BloodPressureShape(String),

    #[error("Invalid blood pressure format")]
    BloodPressureNotNumeric(String),

    #[error("Systolic pressure must be between 50 and 250")]
    Systolic(i32),

    #[error("Diastolic pressure must be between 30 and 150")]
    Diastolic(i32),

    #[error("Systolic pressure must be greater than diastolic")]
    SystolicNotAboveDiastolic { systolic: i32, diastolic: i32 },

    #[error("Lifestyle information is required and must be descriptive")]
    LifestyleTooShort(usize),

    #[error("Invalid {field} value: {value}")]
    LifestyleField { field: &'static str, value: String },
}

/// Validate raw metrics and build the typed record.
pub fn validate_metrics(input: &HealthMetricsInput) -> Result<HealthMetrics, ValidationError> {
    let age = validate_age(input.age)?;
    check_range(input.weight_kg, &WEIGHT_KG_RANGE, ValidationError::Weight)?;
    check_range(input.height_cm, &HEIGHT_CM_RANGE, ValidationError::Height)?;
    check_range(
        input.cholesterol_mg_dl,
        &CHOLESTEROL_RANGE,
        ValidationError::Cholesterol,
    )?;
    check_range(input.glucose_mg_dl, &GLUCOSE_RANGE, ValidationError::Glucose)?;
    let blood_pressure = validate_blood_pressure_input(&input.blood_pressure)?;
    let lifestyle = validate_lifestyle(&input.lifestyle)?;

    Ok(HealthMetrics::from_validated(
        age,
        input.weight_kg,
        input.height_cm,
        blood_pressure,
        input.cholesterol_mg_dl,
        input.glucose_mg_dl,
        lifestyle,
    ))
}

fn validate_age(age: i64) -> Result<u32, ValidationError> {
    if !AGE_RANGE.contains(&age) {
        return Err(ValidationError::Age(age));
    }
    u32::try_from(age).map_err(|_| ValidationError::Age(age))
}

// NaN fails `contains`, so it is rejected like any out-of-range value.
fn check_range(
    value: f64,
    range: &RangeInclusive<f64>,
    err: fn(f64) -> ValidationError,
) -> Result<(), ValidationError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(err(value))
    }
}

pub fn validate_blood_pressure_input(
    input: &BloodPressureInput,
) -> Result<BloodPressure, ValidationError> {
    match input {
        BloodPressureInput::Reading(s) => parse_blood_pressure(s),
        BloodPressureInput::Pair {
            systolic,
            diastolic,
        } => validate_blood_pressure(*systolic, *diastolic),
    }
}

/// Parse and range-check a "systolic/diastolic" string such as "120/80".
pub fn parse_blood_pressure(reading: &str) -> Result<BloodPressure, ValidationError> {
    let parts: Vec<&str> = reading.split('/').collect();
    if parts.len() != 2 {
        return Err(ValidationError::BloodPressureShape(reading.to_string()));
    }

    let parse = |part: &str| {
        part.trim()
            .parse::<i32>()
            .map_err(|_| ValidationError::BloodPressureNotNumeric(reading.to_string()))
    };
    let systolic = parse(parts[0])?;
    let diastolic = parse(parts[1])?;

    validate_blood_pressure(systolic, diastolic)
}

pub fn validate_blood_pressure(
    systolic: i32,
    diastolic: i32,
) -> Result<BloodPressure, ValidationError> {
    if !SYSTOLIC_RANGE.contains(&systolic) {
        return Err(ValidationError::Systolic(systolic));
    }
    if !DIASTOLIC_RANGE.contains(&diastolic) {
        return Err(ValidationError::Diastolic(diastolic));
    }
    if systolic <= diastolic {
        return Err(ValidationError::SystolicNotAboveDiastolic {
            systolic,
            diastolic,
        });
    }
    Ok(BloodPressure {
        systolic,
        diastolic,
    })
}

pub fn validate_lifestyle(input: &LifestyleInput) -> Result<LifestyleProfile, ValidationError> {
    match input {
        LifestyleInput::FreeText(text) => {
            let chars = text.trim().chars().count();
            if chars < MIN_LIFESTYLE_TEXT_CHARS {
                return Err(ValidationError::LifestyleTooShort(chars));
            }
            Ok(parse_free_text_lifestyle(text))
        }
        LifestyleInput::Structured {
            exercise,
            smoking,
            diet,
            alcohol,
        } => {
            let alcohol = match alcohol.as_deref() {
                Some(value) if !value.trim().is_empty() => {
                    Some(parse_field(value, "alcohol", AlcoholUse::parse_loose)?)
                }
                _ => None,
            };
            Ok(LifestyleProfile {
                exercise: parse_field(exercise, "exercise", ExerciseFrequency::parse_loose)?,
                smoking: parse_field(smoking, "smoking", SmokingStatus::parse_loose)?,
                diet: parse_field(diet, "diet", DietQuality::parse_loose)?,
                alcohol,
            })
        }
    }
}

fn parse_field<T>(
    value: &str,
    field: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, ValidationError> {
    parse(value).ok_or_else(|| ValidationError::LifestyleField {
        field,
        value: value.to_string(),
    })
}
