pub mod config;
pub mod db;
pub mod models;
pub mod risk;

use tracing_subscriber::EnvFilter;

pub use risk::{AssessmentService, Assessment, AssessmentError, ValidationError};

/// Install the global fmt subscriber. RUST_LOG wins over the default filter.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
