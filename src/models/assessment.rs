use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::risk::types::Assessment;

/// A stored assessment. Rows are written once and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedAssessment {
    pub id: Uuid,
    pub patient_id: String,
    pub assessment: Assessment,
}
