use std::path::Path;

use stride_core::models::record::AssessmentRecord;

use crate::error::StorageError;

/// Read-only source of assessment records, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<AssessmentRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<AssessmentRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self, StorageError> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let records = values
            .into_iter()
            .map(AssessmentRecord::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    pub async fn load(path: &Path) -> Result<Self, StorageError> {
        let key = path.display().to_string();
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StorageError::io(&key, e, StorageError::read))?;
        let store = Self::from_json_str(&contents)?;
        tracing::info!(path = %key, records = store.records.len(), "loaded assessment records");
        Ok(store)
    }

    /// First record with the given session id.
    pub fn find(&self, session_id: &str) -> Option<&AssessmentRecord> {
        self.records.iter().find(|r| r.session_id() == session_id)
    }

    /// Every record, in source order.
    pub fn all(&self) -> &[AssessmentRecord] {
        &self.records
    }
}
