//! The four condition scorers. Each is a pure function of the metrics and
//! the shared BMI; none reads another scorer's output. Sums are returned
//! raw: rounding and clamping happen once, in the predictor.

use super::helpers::{age_contribution, bp_at_least, format_mg_dl};
use crate::models::enums::{DietQuality, SmokingStatus};
use crate::models::HealthMetrics;

/// Heart-disease scoring caps the exercise reduction at this many points.
pub const HEART_EXERCISE_CAP: f64 = 20.0;

/// Raw score plus the factors that moved it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionScore {
    pub raw: f64,
    /// Factors that raised the score.
    pub factors: Vec<String>,
    /// Factors that lowered it.
    pub protective: Vec<String>,
}

impl ConditionScore {
    fn add(&mut self, points: f64, factor: impl Into<Option<String>>) {
        self.raw += points;
        if let Some(f) = factor.into() {
            self.factors.push(f);
        }
    }

    fn subtract(&mut self, points: f64, factor: String) {
        if points > 0.0 {
            self.raw -= points;
            self.protective.push(factor);
        } else if points < 0.0 {
            self.raw -= points;
            self.factors.push(factor);
        }
    }
}

fn bmi_factor(bmi: f64) -> String {
    format!("obesity (BMI {bmi:.1})")
}

/// age/2 (max 30) + BMI band + glucose band − exercise bonus.
pub fn score_diabetes(metrics: &HealthMetrics, bmi: f64) -> ConditionScore {
    let mut score = ConditionScore::default();
    let age = metrics.age();

    score.add(
        age_contribution(age, 5, 30.0),
        (age >= 45).then(|| format!("age {age}")),
    );

    if bmi >= 30.0 {
        score.add(35.0, bmi_factor(bmi));
    } else if bmi >= 25.0 {
        score.add(20.0, format!("overweight (BMI {bmi:.1})"));
    }

    let glucose = metrics.glucose_mg_dl();
    if glucose >= 126.0 {
        score.add(
            40.0,
            format!("fasting glucose {} (diabetic range)", format_mg_dl(glucose)),
        );
    } else if glucose >= 100.0 {
        score.add(
            25.0,
            format!("fasting glucose {} (prediabetic range)", format_mg_dl(glucose)),
        );
    }

    let exercise = metrics.lifestyle().exercise;
    score.subtract(exercise.bonus(), format!("exercise {exercise}"));

    score
}

/// Blood-pressure step (highest band first) + age × 0.3 (max 20) + obesity.
pub fn score_hypertension(metrics: &HealthMetrics, bmi: f64) -> ConditionScore {
    let mut score = ConditionScore::default();
    let bp = metrics.blood_pressure();

    let (base, label) = if bp_at_least(bp, 180, 120) {
        (85.0, Some("hypertensive crisis"))
    } else if bp_at_least(bp, 160, 100) {
        (70.0, Some("stage 2 hypertension"))
    } else if bp_at_least(bp, 140, 90) {
        (55.0, Some("high"))
    } else if bp_at_least(bp, 130, 80) {
        (35.0, Some("elevated"))
    } else {
        (15.0, None)
    };
    score.add(base, label.map(|l| format!("blood pressure {bp} ({l})")));

    let age = metrics.age();
    score.add(
        age_contribution(age, 3, 20.0),
        (age >= 45).then(|| format!("age {age}")),
    );

    if bmi >= 30.0 {
        score.add(15.0, bmi_factor(bmi));
    }

    score
}

/// age × 0.6 (max 35) + high BP + BMI band + cholesterol band + smoking
/// − exercise bonus (max 20).
pub fn score_heart_disease(metrics: &HealthMetrics, bmi: f64) -> ConditionScore {
    let mut score = ConditionScore::default();
    let age = metrics.age();

    score.add(
        age_contribution(age, 6, 35.0),
        (age >= 55).then(|| format!("age {age}")),
    );

    let bp = metrics.blood_pressure();
    if bp_at_least(bp, 140, 90) {
        score.add(25.0, format!("high blood pressure ({bp})"));
    }

    if bmi >= 30.0 {
        score.add(20.0, bmi_factor(bmi));
    } else if bmi >= 25.0 {
        score.add(10.0, format!("overweight (BMI {bmi:.1})"));
    }

    let cholesterol = metrics.cholesterol_mg_dl();
    if cholesterol >= 240.0 {
        score.add(30.0, format!("high cholesterol ({})", format_mg_dl(cholesterol)));
    } else if cholesterol >= 200.0 {
        score.add(
            15.0,
            format!("borderline high cholesterol ({})", format_mg_dl(cholesterol)),
        );
    }

    match metrics.lifestyle().smoking {
        SmokingStatus::Yes => score.add(40.0, "current smoking".to_string()),
        SmokingStatus::Former => score.add(20.0, "former smoking".to_string()),
        SmokingStatus::No => {}
    }

    let exercise = metrics.lifestyle().exercise;
    score.subtract(
        exercise.bonus().min(HEART_EXERCISE_CAP),
        format!("exercise {exercise}"),
    );

    score
}

/// Cholesterol step + obesity − exercise bonus (uncapped) + diet adjustment.
pub fn score_high_cholesterol(metrics: &HealthMetrics, bmi: f64) -> ConditionScore {
    let mut score = ConditionScore::default();
    let cholesterol = metrics.cholesterol_mg_dl();
    let reading = format_mg_dl(cholesterol);

    let (base, label) = if cholesterol >= 240.0 {
        (80.0, Some("high"))
    } else if cholesterol >= 200.0 {
        (55.0, Some("borderline high"))
    } else if cholesterol >= 180.0 {
        (35.0, Some("near borderline"))
    } else {
        (15.0, None)
    };
    score.add(base, label.map(|l| format!("cholesterol {reading} ({l})")));

    if bmi >= 30.0 {
        score.add(15.0, bmi_factor(bmi));
    }

    let exercise = metrics.lifestyle().exercise;
    score.subtract(exercise.bonus(), format!("exercise {exercise}"));

    let diet = metrics.lifestyle().diet;
    let adjustment = diet.cholesterol_adjustment();
    let diet_label = format!("{} diet", diet.as_str().to_lowercase());
    match diet {
        DietQuality::Good => {}
        _ if adjustment > 0.0 => score.add(adjustment, diet_label),
        _ => score.subtract(-adjustment, diet_label),
    }

    score
}
