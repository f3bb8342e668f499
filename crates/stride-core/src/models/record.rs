use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// One subject's captured measurements for one session.
///
/// The document is kept exactly as the upstream system produced it; the
/// session and assessment-type identifiers are lifted out on construction
/// so lookups do not need to walk the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct AssessmentRecord {
    session_id: String,
    assessment_id: String,
    document: Value,
}

impl AssessmentRecord {
    pub fn from_value(document: Value) -> Result<Self, CoreError> {
        let obj = document.as_object().ok_or_else(|| {
            CoreError::InvalidRecord("assessment record is not a JSON object".to_string())
        })?;

        let session_id = required_str(obj, "session_id")?;
        let assessment_id = required_str(obj, "assessment_id")?;

        Ok(Self {
            session_id,
            assessment_id,
            document,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn assessment_id(&self) -> &str {
        &self.assessment_id
    }

    /// The full record tree, rooted at the top-level object.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Source timestamp as written by the capturing system, or `Null`.
    pub fn timestamp(&self) -> Value {
        self.document
            .get("timestamp")
            .cloned()
            .unwrap_or(Value::Null)
    }
}

fn required_str(obj: &serde_json::Map<String, Value>, key: &str) -> Result<String, CoreError> {
    match obj.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(_) => Err(CoreError::InvalidRecord(format!(
            "{key} must be a non-empty string"
        ))),
        None => Err(CoreError::MissingField(key.to_string())),
    }
}

impl TryFrom<Value> for AssessmentRecord {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<AssessmentRecord> for Value {
    fn from(record: AssessmentRecord) -> Self {
        record.document
    }
}
