use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// File information for a generated report on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportInfo {
    pub filename: String,
    pub size: u64,
    pub created_at: jiff::Timestamp,
    pub modified_at: jiff::Timestamp,
}

/// Outcome of a completed report generation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GeneratedReport {
    pub filename: String,
    pub path: String,
    pub size: u64,
    /// Display name of the assessment configuration used.
    pub assessment_type: String,
    pub session_id: String,
    pub generated_at: jiff::Timestamp,
}
