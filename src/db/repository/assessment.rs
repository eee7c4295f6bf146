use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::RiskLevel;
use crate::models::{
    BloodPressureInput, HealthMetrics, HealthMetricsInput, LifestyleInput, PersistedAssessment,
};
use crate::risk::types::{Assessment, OverallRisk};

const SELECT_COLUMNS: &str =
    "SELECT id, patient_id, age, weight_kg, height_cm, systolic_bp, diastolic_bp,
            cholesterol_mg_dl, glucose_mg_dl, exercise, smoking, diet, alcohol, bmi,
            risk_scores, recommendations, detailed_recommendations,
            overall_score, overall_level, created_at
     FROM assessments";

/// Persist one assessment together with its patient row.
/// Scores and recommendations are written in a single row inside one
/// transaction. Returns the generated record id.
pub fn insert_assessment(
    conn: &Connection,
    patient_id: &str,
    assessment: &Assessment,
) -> Result<Uuid, DatabaseError> {
    let patient_id = patient_id.trim();
    if patient_id.is_empty() {
        return Err(DatabaseError::ConstraintViolation(
            "patient_id must not be empty".into(),
        ));
    }

    let id = Uuid::new_v4();
    let metrics = &assessment.metrics;
    let bp = metrics.blood_pressure();
    let lifestyle = metrics.lifestyle();
    let scores = &assessment.scores;

    let scores_json = serde_json::to_string(scores)?;
    let recommendations_json = serde_json::to_string(&assessment.recommendations)?;
    let detailed_json = serde_json::to_string(&assessment.detailed)?;

    let tx = conn.unchecked_transaction()?;

    tx.execute(
        "INSERT OR IGNORE INTO patients (patient_id) VALUES (?1)",
        params![patient_id],
    )?;

    tx.execute(
        "INSERT INTO assessments
         (id, patient_id, age, weight_kg, height_cm, systolic_bp, diastolic_bp,
          cholesterol_mg_dl, glucose_mg_dl, exercise, smoking, diet, alcohol, bmi,
          diabetes_risk, heart_disease_risk, hypertension_risk, high_cholesterol_risk,
          risk_scores, recommendations, detailed_recommendations,
          overall_score, overall_level, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                 ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24)",
        params![
            id.to_string(),
            patient_id,
            metrics.age(),
            metrics.weight_kg(),
            metrics.height_cm(),
            bp.systolic,
            bp.diastolic,
            metrics.cholesterol_mg_dl(),
            metrics.glucose_mg_dl(),
            lifestyle.exercise.as_str(),
            lifestyle.smoking.as_str(),
            lifestyle.diet.as_str(),
            lifestyle.alcohol.map(|a| a.as_str()),
            assessment.bmi,
            scores.diabetes.score,
            scores.heart_disease.score,
            scores.hypertension.score,
            scores.high_cholesterol.score,
            scores_json,
            recommendations_json,
            detailed_json,
            assessment.overall.average_score,
            assessment.overall.level.as_str(),
            assessment.assessed_at,
        ],
    )?;

    tx.commit()?;

    tracing::debug!(assessment_id = %id, patient_id, "Assessment row inserted");
    Ok(id)
}

/// Fetch an assessment by id.
pub fn get_assessment(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<PersistedAssessment>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            params![id.to_string()],
            read_row,
        )
        .optional()?;
    row.map(row_to_assessment).transpose()
}

/// A patient's assessments, newest first.
pub fn get_patient_history(
    conn: &Connection,
    patient_id: &str,
    limit: usize,
) -> Result<Vec<PersistedAssessment>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_COLUMNS} WHERE patient_id = ?1 ORDER BY created_at DESC, rowid DESC LIMIT ?2"
    ))?;
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let rows = stmt.query_map(params![patient_id, limit], read_row)?;

    let mut history = Vec::new();
    for row in rows {
        history.push(row_to_assessment(row?)?);
    }
    Ok(history)
}

/// The most recent assessment for a patient, if any.
pub fn get_latest_assessment(
    conn: &Connection,
    patient_id: &str,
) -> Result<Option<PersistedAssessment>, DatabaseError> {
    Ok(get_patient_history(conn, patient_id, 1)?.into_iter().next())
}

pub fn count_assessments(conn: &Connection, patient_id: &str) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM assessments WHERE patient_id = ?1",
        params![patient_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Raw column values, decoded outside the rusqlite closure so parse
/// failures surface as `DatabaseError`.
struct AssessmentRow {
    id: String,
    patient_id: String,
    age: i64,
    weight_kg: f64,
    height_cm: f64,
    systolic: i32,
    diastolic: i32,
    cholesterol: f64,
    glucose: f64,
    exercise: String,
    smoking: String,
    diet: String,
    alcohol: Option<String>,
    bmi: f64,
    risk_scores: String,
    recommendations: String,
    detailed: String,
    overall_score: f64,
    overall_level: String,
    created_at: NaiveDateTime,
}

fn read_row(row: &rusqlite::Row) -> Result<AssessmentRow, rusqlite::Error> {
    Ok(AssessmentRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        age: row.get(2)?,
        weight_kg: row.get(3)?,
        height_cm: row.get(4)?,
        systolic: row.get(5)?,
        diastolic: row.get(6)?,
        cholesterol: row.get(7)?,
        glucose: row.get(8)?,
        exercise: row.get(9)?,
        smoking: row.get(10)?,
        diet: row.get(11)?,
        alcohol: row.get(12)?,
        bmi: row.get(13)?,
        risk_scores: row.get(14)?,
        recommendations: row.get(15)?,
        detailed: row.get(16)?,
        overall_score: row.get(17)?,
        overall_level: row.get(18)?,
        created_at: row.get(19)?,
    })
}

fn row_to_assessment(row: AssessmentRow) -> Result<PersistedAssessment, DatabaseError> {
    let id = Uuid::parse_str(&row.id)
        .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?;

    // Stored metrics go back through validation so a corrupted row can
    // never produce an out-of-range HealthMetrics.
    let metrics = HealthMetrics::try_from(HealthMetricsInput {
        age: row.age,
        weight_kg: row.weight_kg,
        height_cm: row.height_cm,
        blood_pressure: BloodPressureInput::Pair {
            systolic: row.systolic,
            diastolic: row.diastolic,
        },
        cholesterol_mg_dl: row.cholesterol,
        glucose_mg_dl: row.glucose,
        lifestyle: LifestyleInput::Structured {
            exercise: row.exercise,
            smoking: row.smoking,
            diet: row.diet,
            alcohol: row.alcohol,
        },
    })
    .map_err(|e| DatabaseError::ConstraintViolation(format!("assessment {id}: {e}")))?;

    let level: RiskLevel = row.overall_level.parse()?;

    Ok(PersistedAssessment {
        id,
        patient_id: row.patient_id,
        assessment: Assessment {
            metrics,
            bmi: row.bmi,
            scores: serde_json::from_str(&row.risk_scores)?,
            recommendations: serde_json::from_str(&row.recommendations)?,
            detailed: serde_json::from_str(&row.detailed)?,
            overall: OverallRisk {
                average_score: row.overall_score,
                level,
            },
            assessed_at: row.created_at,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::models::enums::AlcoholUse;
    use crate::risk::engine::AssessmentService;

    fn test_db() -> Connection {
        open_memory_database().unwrap()
    }

    fn sample_assessment(age: i64) -> Assessment {
        let service = AssessmentService::with_defaults().unwrap();
        service
            .assess(&HealthMetricsInput {
                age,
                weight_kg: 85.5,
                height_cm: 175.0,
                blood_pressure: "140/90".into(),
                cholesterol_mg_dl: 220.0,
                glucose_mg_dl: 110.0,
                lifestyle: LifestyleInput::Structured {
                    exercise: "2x/week".into(),
                    smoking: "No".into(),
                    diet: "Fair".into(),
                    alcohol: Some("Light".into()),
                },
            })
            .unwrap()
    }

    #[test]
    fn insert_and_fetch_round_trip() {
        let conn = test_db();
        let assessment = sample_assessment(45);
        let id = insert_assessment(&conn, "P001", &assessment).unwrap();

        let stored = get_assessment(&conn, &id).unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.patient_id, "P001");
        assert_eq!(stored.assessment.scores, assessment.scores);
        assert_eq!(stored.assessment.recommendations, assessment.recommendations);
        assert_eq!(stored.assessment.detailed, assessment.detailed);
        assert_eq!(stored.assessment.metrics, assessment.metrics);
        assert_eq!(stored.assessment.metrics.lifestyle().alcohol, Some(AlcoholUse::Light));
        assert_eq!(stored.assessment.overall, assessment.overall);
    }

    #[test]
    fn timestamp_stored_as_sqlite_datetime_text() {
        let conn = test_db();
        let mut assessment = sample_assessment(45);
        assessment.assessed_at = NaiveDateTime::parse_from_str(
            "2024-03-05 14:07:09",
            "%Y-%m-%d %H:%M:%S",
        )
        .unwrap();
        let id = insert_assessment(&conn, "P007", &assessment).unwrap();

        let raw: String = conn
            .query_row(
                "SELECT created_at FROM assessments WHERE id = ?1",
                params![id.to_string()],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(raw, "2024-03-05 14:07:09");

        let stored = get_assessment(&conn, &id).unwrap().unwrap();
        assert_eq!(stored.assessment.assessed_at, assessment.assessed_at);
    }

    #[test]
    fn get_missing_returns_none() {
        let conn = test_db();
        assert!(get_assessment(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn history_newest_first_and_limited() {
        let conn = test_db();
        let mut ids = Vec::new();
        for age in [40, 50, 60] {
            ids.push(insert_assessment(&conn, "P002", &sample_assessment(age)).unwrap());
        }
        insert_assessment(&conn, "P003", &sample_assessment(30)).unwrap();

        let history = get_patient_history(&conn, "P002", 10).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].id, ids[2]);
        assert_eq!(history[2].id, ids[0]);

        let limited = get_patient_history(&conn, "P002", 2).unwrap();
        assert_eq!(limited.len(), 2);

        let latest = get_latest_assessment(&conn, "P002").unwrap().unwrap();
        assert_eq!(latest.id, ids[2]);
        assert_eq!(latest.assessment.metrics.age(), 60);

        assert_eq!(count_assessments(&conn, "P002").unwrap(), 3);
        assert_eq!(count_assessments(&conn, "P003").unwrap(), 1);
    }

    #[test]
    fn latest_for_unknown_patient_is_none() {
        let conn = test_db();
        assert!(get_latest_assessment(&conn, "nobody").unwrap().is_none());
    }

    #[test]
    fn empty_patient_id_rejected() {
        let conn = test_db();
        let err = insert_assessment(&conn, "  ", &sample_assessment(45)).unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));
        let total: i64 = conn
            .query_row("SELECT COUNT(*) FROM assessments", [], |row| row.get(0))
            .unwrap();
        assert_eq!(total, 0);
    }

    #[test]
    fn patient_row_created_once() {
        let conn = test_db();
        insert_assessment(&conn, "P004", &sample_assessment(45)).unwrap();
        insert_assessment(&conn, "P004", &sample_assessment(46)).unwrap();
        let patients: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM patients WHERE patient_id = 'P004'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(patients, 1);
    }

    #[test]
    fn score_columns_match_json() {
        let conn = test_db();
        let assessment = sample_assessment(45);
        let id = insert_assessment(&conn, "P005", &assessment).unwrap();
        let (diabetes, hypertension): (i64, i64) = conn
            .query_row(
                "SELECT diabetes_risk, hypertension_risk FROM assessments WHERE id = ?1",
                params![id.to_string()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(diabetes, 58);
        assert_eq!(hypertension, 69);
    }

    #[test]
    fn corrupted_row_surfaces_constraint_violation() {
        let conn = test_db();
        let id = insert_assessment(&conn, "P006", &sample_assessment(45)).unwrap();
        conn.execute(
            "UPDATE assessments SET systolic_bp = 60, diastolic_bp = 90 WHERE id = ?1",
            params![id.to_string()],
        )
        .unwrap();
        let err = get_assessment(&conn, &id).unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));
    }
}
