use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A session available for report generation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionSummary {
    pub session_id: String,
    pub assessment_id: String,
    /// Configured assessment name, or `"Unknown"` when the type has no configuration.
    pub assessment_name: String,
    pub timestamp: serde_json::Value,
}
