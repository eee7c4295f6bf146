use super::helpers::join_factors;
use crate::models::enums::{Condition, RiskLevel};

/// Explanation builder for condition scores. Cites the factors that moved
/// the score and always ends with the BMI the scorers used.
pub struct ExplanationTemplates;

impl ExplanationTemplates {
    pub fn explain(
        condition: Condition,
        level: RiskLevel,
        factors: &[String],
        protective: &[String],
        bmi: f64,
    ) -> String {
        let name = condition.display_name();
        let mut text = match level {
            RiskLevel::High => Self::high(name, factors),
            RiskLevel::Moderate => Self::moderate(name, factors),
            RiskLevel::Low => Self::low(name, factors),
        };
        if !protective.is_empty() {
            text.push_str(&format!(" Lowered by: {}.", join_factors(protective)));
        }
        text.push_str(&format!(" BMI is {bmi:.1}."));
        text
    }

    fn high(name: &str, factors: &[String]) -> String {
        if factors.is_empty() {
            format!("High {name} risk.")
        } else {
            format!("High {name} risk due to: {}.", join_factors(factors))
        }
    }

    fn moderate(name: &str, factors: &[String]) -> String {
        if factors.is_empty() {
            format!("Moderate {name} risk. Contributing factors: age and BMI in moderate range.")
        } else {
            format!(
                "Moderate {name} risk. Contributing factors: {}.",
                join_factors(factors)
            )
        }
    }

    fn low(name: &str, factors: &[String]) -> String {
        if factors.is_empty() {
            format!("Low {name} risk. Measured values and lifestyle factors are favorable.")
        } else {
            format!("Low {name} risk. Minor factors: {}.", join_factors(factors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_cites_factors_and_bmi() {
        let text = ExplanationTemplates::explain(
            Condition::HeartDisease,
            RiskLevel::High,
            &["current smoking".into(), "high blood pressure (150/95)".into()],
            &[],
            31.24,
        );
        assert_eq!(
            text,
            "High Heart Disease risk due to: current smoking and high blood pressure (150/95). BMI is 31.2."
        );
    }

    #[test]
    fn protective_factors_listed() {
        let text = ExplanationTemplates::explain(
            Condition::Diabetes,
            RiskLevel::Moderate,
            &["overweight (BMI 27.9)".into()],
            &["exercise 2x/week".into()],
            27.92,
        );
        assert!(text.contains("Lowered by: exercise 2x/week."));
        assert!(text.ends_with("BMI is 27.9."));
    }

    #[test]
    fn low_without_factors() {
        let text = ExplanationTemplates::explain(
            Condition::HighCholesterol,
            RiskLevel::Low,
            &[],
            &[],
            22.0,
        );
        assert!(text.starts_with("Low High Cholesterol risk."));
    }
}
