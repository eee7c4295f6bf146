//! Free-text lifestyle descriptions mapped onto the categorical descriptors.
//!
//! Labelled values ("Exercise: 2x/week") win over loose keywords
//! ("sedentary"). Anything unrecognised keeps the zero-contribution default.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::enums::{AlcoholUse, DietQuality, ExerciseFrequency, SmokingStatus};
use crate::models::LifestyleProfile;

static LABELLED_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(exercise|smoking|diet|alcohol)\s*[:=]\s*([^,;\n]+)").unwrap()
});

static TIMES_PER_WEEK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)\s*(?:x|times?)\b").unwrap());

static NON_SMOKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:non[-\s]?smoker|not\s+a\s+smoker|never\s+smoked|(?:does\s*not|doesn'?t)\s+smoke)\b")
        .unwrap()
});

static FORMER_SMOKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:former\s+smoker|ex[-\s]?smoker|quit\s+smoking|stopped\s+smoking)\b").unwrap()
});

static SMOKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bsmokers?\b").unwrap());

pub fn parse_free_text_lifestyle(text: &str) -> LifestyleProfile {
    let mut profile = LifestyleProfile::default();
    // A labelled field disables its keyword fallback even when the value
    // is unrecognised.
    let mut seen = [false; 3];

    for caps in LABELLED_VALUE.captures_iter(text) {
        let label = caps[1].to_ascii_lowercase();
        let value = caps[2].trim();
        match label.as_str() {
            "exercise" => {
                seen[0] = true;
                if let Some(freq) = exercise_from_value(value) {
                    profile.exercise = freq;
                }
            }
            "smoking" => {
                seen[1] = true;
                if let Some(status) = smoking_from_value(value) {
                    profile.smoking = status;
                }
            }
            "diet" => {
                seen[2] = true;
                if let Some(diet) = parse_leading(value, DietQuality::parse_loose) {
                    profile.diet = diet;
                }
            }
            "alcohol" => profile.alcohol = parse_leading(value, AlcoholUse::parse_loose),
            _ => {}
        }
    }

    let lower = text.to_lowercase();
    if !seen[0] && (lower.contains("sedentary") || lower.contains("no exercise")) {
        profile.exercise = ExerciseFrequency::Rarely;
    }
    if !seen[1] {
        if NON_SMOKER.is_match(text) {
            profile.smoking = SmokingStatus::No;
        } else if FORMER_SMOKER.is_match(text) {
            profile.smoking = SmokingStatus::Former;
        } else if SMOKER.is_match(text) {
            profile.smoking = SmokingStatus::Yes;
        }
    }
    if !seen[2]
        && (lower.contains("poor diet") || lower.contains("fast food") || lower.contains("fried"))
    {
        profile.diet = DietQuality::Poor;
    }

    tracing::debug!(
        exercise = profile.exercise.as_str(),
        smoking = profile.smoking.as_str(),
        diet = profile.diet.as_str(),
        "Parsed free-text lifestyle"
    );

    profile
}

/// Try the whole value, then its first word ("No (ex-smoker)" -> "No").
fn parse_leading<T>(value: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
    parse(value).or_else(|| leading_word(value).and_then(parse))
}

/// First word of a value, without trailing punctuation.
fn leading_word(value: &str) -> Option<&str> {
    value
        .split(|c: char| c.is_whitespace() || c == '(')
        .find(|w| !w.is_empty())
        .map(|w| w.trim_end_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
}

fn exercise_from_value(value: &str) -> Option<ExerciseFrequency> {
    if let Some(freq) = parse_leading(value, ExerciseFrequency::parse_loose) {
        return Some(freq);
    }
    let word = leading_word(value)?.to_ascii_lowercase();
    if matches!(word.as_str(), "never" | "none" | "no" | "sedentary") {
        return Some(ExerciseFrequency::Rarely);
    }
    let caps = TIMES_PER_WEEK.captures(value.trim())?;
    let times: u32 = caps[1].parse().ok()?;
    Some(match times {
        0 => ExerciseFrequency::Rarely,
        1 => ExerciseFrequency::OncePerWeek,
        2 => ExerciseFrequency::TwicePerWeek,
        3 => ExerciseFrequency::ThricePerWeek,
        4 => ExerciseFrequency::FourTimesPerWeek,
        _ => ExerciseFrequency::FiveTimesPerWeek,
    })
}

fn smoking_from_value(value: &str) -> Option<SmokingStatus> {
    if let Some(status) = parse_leading(value, SmokingStatus::parse_loose) {
        return Some(status);
    }
    let word = leading_word(value)?.to_ascii_lowercase();
    if word.starts_with("non") || word == "never" || word == "not" {
        Some(SmokingStatus::No)
    } else if word == "quit" || word == "ex" || word.starts_with("ex-") || word == "stopped" {
        Some(SmokingStatus::Former)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labelled_form_text() {
        let profile =
            parse_free_text_lifestyle("Exercise: 2x/week, Smoking: No, Diet: Fair, Alcohol: Moderate");
        assert_eq!(profile.exercise, ExerciseFrequency::TwicePerWeek);
        assert_eq!(profile.smoking, SmokingStatus::No);
        assert_eq!(profile.diet, DietQuality::Fair);
        assert_eq!(profile.alcohol, Some(AlcoholUse::Moderate));
    }

    #[test]
    fn unrecognised_label_value_keeps_default() {
        let profile = parse_free_text_lifestyle("Exercise: 1x/week, Diet: Mixed");
        assert_eq!(profile.exercise, ExerciseFrequency::OncePerWeek);
        assert_eq!(profile.diet, DietQuality::Good);
    }

    #[test]
    fn times_per_week_phrasing() {
        let profile = parse_free_text_lifestyle("exercise = 4 times a week; smoking: never");
        assert_eq!(profile.exercise, ExerciseFrequency::FourTimesPerWeek);
        assert_eq!(profile.smoking, SmokingStatus::No);

        let profile = parse_free_text_lifestyle("Exercise: 7x per week");
        assert_eq!(profile.exercise, ExerciseFrequency::FiveTimesPerWeek);
    }

    #[test]
    fn keyword_fallbacks() {
        let profile = parse_free_text_lifestyle("Sedentary office job, smoker, lots of fast food");
        assert_eq!(profile.exercise, ExerciseFrequency::Rarely);
        assert_eq!(profile.smoking, SmokingStatus::Yes);
        assert_eq!(profile.diet, DietQuality::Poor);
    }

    #[test]
    fn former_smoker_keyword() {
        let profile = parse_free_text_lifestyle("Former smoker, walks daily");
        assert_eq!(profile.smoking, SmokingStatus::Former);
    }

    #[test]
    fn label_beats_keyword() {
        let profile = parse_free_text_lifestyle("Smoking: No (partner is a smoker)");
        assert_eq!(profile.smoking, SmokingStatus::No);
    }

    #[test]
    fn negated_smoker_phrasings_are_non_smokers() {
        for text in [
            "Non-smoker, walks 3x/week",
            "nonsmoker who cycles to work",
            "Non smoker, vegetarian diet",
            "I am not a smoker and eat well",
            "Never smoked, swims weekly",
            "Doesn't smoke, mostly home cooking",
        ] {
            assert_eq!(parse_free_text_lifestyle(text).smoking, SmokingStatus::No, "{text:?}");
        }
    }

    #[test]
    fn ex_smoker_phrasings_are_former() {
        for text in ["ex-smoker, eats well daily", "Ex smoker since 2019", "stopped smoking last year"] {
            assert_eq!(
                parse_free_text_lifestyle(text).smoking,
                SmokingStatus::Former,
                "{text:?}"
            );
        }
    }

    #[test]
    fn labelled_negated_smoking_values() {
        let profile = parse_free_text_lifestyle("Smoking: non-smoker, Diet: Good");
        assert_eq!(profile.smoking, SmokingStatus::No);
        assert_eq!(profile.diet, DietQuality::Good);

        let profile = parse_free_text_lifestyle("Smoking: never, Exercise: 2x/week");
        assert_eq!(profile.smoking, SmokingStatus::No);

        let profile = parse_free_text_lifestyle("Smoking: not anymore, quit 2020");
        assert_eq!(profile.smoking, SmokingStatus::No);

        let profile = parse_free_text_lifestyle("Smoking: ex-smoker");
        assert_eq!(profile.smoking, SmokingStatus::Former);
    }

    #[test]
    fn unrecognised_smoking_label_blocks_keyword_fallback() {
        let profile = parse_free_text_lifestyle("Smoking: occasionally, partner is a smoker");
        assert_eq!(profile.smoking, SmokingStatus::No);
    }

    #[test]
    fn bare_smoker_word_only() {
        assert_eq!(
            parse_free_text_lifestyle("Heavy smoker, little exercise").smoking,
            SmokingStatus::Yes
        );
        assert_eq!(
            parse_free_text_lifestyle("Enjoys smoked salmon on weekends").smoking,
            SmokingStatus::No
        );
    }

    #[test]
    fn exercise_values_match_whole_leading_word() {
        let profile = parse_free_text_lifestyle("Exercise: normal amount, Diet: Good");
        assert_eq!(profile.exercise, ExerciseFrequency::Rarely);
        assert_eq!(exercise_from_value("normal amount"), None);
        assert_eq!(exercise_from_value("now 3x/week"), None);
        assert_eq!(exercise_from_value("none"), Some(ExerciseFrequency::Rarely));
        assert_eq!(exercise_from_value("No."), Some(ExerciseFrequency::Rarely));
        assert_eq!(exercise_from_value("sedentary job"), Some(ExerciseFrequency::Rarely));
    }

    #[test]
    fn nothing_recognised_is_default() {
        assert_eq!(
            parse_free_text_lifestyle("Enjoys reading and gardening"),
            LifestyleProfile::default()
        );
    }
}
