use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }

            /// Case-insensitive match against the display strings, ignoring
            /// surrounding whitespace.
            pub fn parse_loose(s: &str) -> Option<Self> {
                let needle = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(needle))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(ExerciseFrequency {
    Rarely => "Rarely",
    OncePerWeek => "1x/week",
    TwicePerWeek => "2x/week",
    ThricePerWeek => "3x/week",
    FourTimesPerWeek => "4x/week",
    FiveTimesPerWeek => "5x/week",
});

impl ExerciseFrequency {
    /// Points subtracted from a condition score for this activity level.
    pub fn bonus(self) -> f64 {
        match self {
            Self::Rarely => 0.0,
            Self::OncePerWeek => 5.0,
            Self::TwicePerWeek => 10.0,
            Self::ThricePerWeek => 15.0,
            Self::FourTimesPerWeek => 20.0,
            Self::FiveTimesPerWeek => 25.0,
        }
    }
}

str_enum!(SmokingStatus {
    No => "No",
    Yes => "Yes",
    Former => "Former",
});

str_enum!(DietQuality {
    Poor => "Poor",
    Fair => "Fair",
    Good => "Good",
    Excellent => "Excellent",
});

impl DietQuality {
    /// Adjustment applied to the high-cholesterol score.
    pub fn cholesterol_adjustment(self) -> f64 {
        match self {
            Self::Poor => 15.0,
            Self::Fair => 10.0,
            Self::Good => 0.0,
            Self::Excellent => -5.0,
        }
    }
}

// Recorded with the assessment; not part of any score.
str_enum!(AlcoholUse {
    None => "None",
    Light => "Light",
    Moderate => "Moderate",
    Heavy => "Heavy",
});

str_enum!(Condition {
    Diabetes => "Diabetes",
    HeartDisease => "Heart_Disease",
    Hypertension => "Hypertension",
    HighCholesterol => "High_Cholesterol",
});

impl Condition {
    /// Human-readable name ("Heart Disease").
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes",
            Self::HeartDisease => "Heart Disease",
            Self::Hypertension => "Hypertension",
            Self::HighCholesterol => "High Cholesterol",
        }
    }
}

str_enum!(RiskLevel {
    Low => "Low",
    Moderate => "Moderate",
    High => "High",
});

impl RiskLevel {
    pub fn priority(self) -> Priority {
        match self {
            Self::Low => Priority::Low,
            Self::Moderate => Priority::Medium,
            Self::High => Priority::High,
        }
    }
}

str_enum!(Priority {
    Low => "Low",
    Medium => "Medium",
    High => "High",
});
