use crate::models::BloodPressure;

/// Round half away from zero, then clamp into 0..=100.
pub fn round_and_clamp(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

/// True when either reading reaches its threshold ("≥140 or ≥90").
pub fn bp_at_least(bp: BloodPressure, systolic: i32, diastolic: i32) -> bool {
    bp.systolic >= systolic || bp.diastolic >= diastolic
}

/// A capped linear age contribution: `min(age * per_decade / 10, cap)`.
/// Integer tenths keep 45 × 0.3 at exactly 13.5.
pub fn age_contribution(age: u32, tenths_per_year: u32, cap: f64) -> f64 {
    (f64::from(age * tenths_per_year) / 10.0).min(cap)
}

/// "220 mg/dL", or "220.5 mg/dL" when the value is fractional.
pub fn format_mg_dl(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0} mg/dL")
    } else {
        format!("{value:.1} mg/dL")
    }
}

/// "a", "a and b", "a, b and c".
pub fn join_factors(factors: &[String]) -> String {
    match factors {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_and_clamp(57.5), 58);
        assert_eq!(round_and_clamp(68.5), 69);
        assert_eq!(round_and_clamp(68.4), 68);
    }

    #[test]
    fn clamped_into_range() {
        assert_eq!(round_and_clamp(150.0), 100);
        assert_eq!(round_and_clamp(-12.0), 0);
        assert_eq!(round_and_clamp(f64::NAN), 0);
        assert_eq!(round_and_clamp(f64::INFINITY), 100);
    }

    #[test]
    fn age_contribution_is_exact_and_capped() {
        assert_eq!(age_contribution(45, 3, 20.0), 13.5);
        assert_eq!(age_contribution(45, 5, 30.0), 22.5);
        assert_eq!(age_contribution(120, 6, 35.0), 35.0);
        assert_eq!(age_contribution(0, 6, 35.0), 0.0);
    }

    #[test]
    fn bp_threshold_either_reading() {
        let bp = BloodPressure { systolic: 128, diastolic: 90 };
        assert!(bp_at_least(bp, 140, 90));
        assert!(!bp_at_least(bp, 140, 91));
    }

    #[test]
    fn formatting() {
        assert_eq!(format_mg_dl(220.0), "220 mg/dL");
        assert_eq!(format_mg_dl(220.5), "220.5 mg/dL");
        assert_eq!(join_factors(&[]), "");
        assert_eq!(join_factors(&["a".into()]), "a");
        assert_eq!(join_factors(&["a".into(), "b".into(), "c".into()]), "a, b and c");
    }
}
