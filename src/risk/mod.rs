//! Risk assessment: validation, per-condition scoring, explanations and
//! template-driven recommendations.

pub mod engine;
pub mod helpers;
pub mod lifestyle;
pub mod messages;
pub mod predictor;
pub mod recommendation;
pub mod scoring;
pub mod templates;
pub mod types;
pub mod validation;

pub use engine::AssessmentService;
pub use predictor::DefaultRiskPredictor;
pub use recommendation::RecommendationEngine;
pub use templates::RecommendationTemplates;
pub use types::*;
pub use validation::ValidationError;
