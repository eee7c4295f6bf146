use std::path::PathBuf;

use crate::risk::types::{AssessmentError, BandThresholds};

/// Application-level constants
pub const APP_NAME: &str = "HealthNexus";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENV_DB_PATH: &str = "HEALTHNEXUS_DB_PATH";
pub const ENV_TEMPLATES: &str = "HEALTHNEXUS_TEMPLATES";
pub const ENV_LOW_RISK_THRESHOLD: &str = "HEALTHNEXUS_LOW_RISK_THRESHOLD";
pub const ENV_HIGH_RISK_THRESHOLD: &str = "HEALTHNEXUS_HIGH_RISK_THRESHOLD";

/// Get the application data directory
/// ~/HealthNexus/ when a home directory is known, ./HealthNexus otherwise
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default SQLite database location
pub fn database_path() -> PathBuf {
    app_data_dir().join("healthnexus.db")
}

/// Default log filter when RUST_LOG is unset
pub fn default_log_filter() -> &'static str {
    "info,healthnexus_lib=debug"
}

/// Runtime settings resolved from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_path: PathBuf,
    /// Replacement recommendation table; the bundled one when `None`.
    pub templates_path: Option<PathBuf>,
    pub thresholds: BandThresholds,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: database_path(),
            templates_path: None,
            thresholds: BandThresholds::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, AssessmentError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary key lookup.
    /// Unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AssessmentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = BandThresholds::default();

        let moderate = match get(ENV_LOW_RISK_THRESHOLD) {
            Some(v) => parse_threshold(ENV_LOW_RISK_THRESHOLD, &v)?,
            None => defaults.moderate,
        };
        let high = match get(ENV_HIGH_RISK_THRESHOLD) {
            Some(v) => parse_threshold(ENV_HIGH_RISK_THRESHOLD, &v)?,
            None => defaults.high,
        };

        let settings = Self {
            database_path: get(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(database_path),
            templates_path: get(ENV_TEMPLATES).map(PathBuf::from),
            thresholds: BandThresholds::new(moderate, high)?,
        };

        tracing::debug!(
            database = %settings.database_path.display(),
            templates = ?settings.templates_path,
            moderate = settings.thresholds.moderate,
            high = settings.thresholds.high,
            "Settings resolved"
        );
        Ok(settings)
    }
}

fn parse_threshold(key: &str, value: &str) -> Result<f64, AssessmentError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AssessmentError::InvalidSetting {
            key: key.into(),
            value: value.into(),
        })
}
