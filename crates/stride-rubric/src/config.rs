use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::classify::ClassificationTable;
use crate::error::RubricError;
use crate::path::FieldPath;

/// One configured measurement: where to find it and how to grade it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub label: String,
    pub path: FieldPath,
    pub unit: String,
    pub classification: ClassificationTable,
}

impl FieldSpec {
    pub fn new(label: &str, path: &str, unit: &str, classification: ClassificationTable) -> Self {
        Self {
            label: label.to_string(),
            path: FieldPath::parse(path),
            unit: unit.to_string(),
            classification,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub fields: Vec<FieldSpec>,
}

impl Section {
    pub fn new(id: &str, title: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            fields,
        }
    }
}

/// Report layout for one assessment type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    pub name: String,
    /// Identifier of the report template used to render this assessment.
    pub template: String,
    pub sections: Vec<Section>,
}

impl AssessmentConfig {
    /// All field specifications in section, then field, order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.sections.iter().flat_map(|s| &s.fields)
    }

    /// Check structural integrity. Malformed paths are reported through
    /// tracing only, since they resolve to absent values at runtime.
    pub fn validate(&self, assessment_id: &str) -> Result<(), RubricError> {
        let mut seen = HashSet::new();
        for section in &self.sections {
            if !seen.insert(section.id.as_str()) {
                return Err(RubricError::DuplicateSection {
                    assessment_id: assessment_id.to_string(),
                    section_id: section.id.clone(),
                });
            }

            for field in &section.fields {
                if field.path.is_malformed() {
                    tracing::warn!(
                        assessment_id,
                        section = %section.id,
                        label = %field.label,
                        path = %field.path,
                        "malformed field path; values will always be absent"
                    );
                }

                if let Some(band) = field.classification.bands().iter().find(|b| b.min > b.max) {
                    return Err(RubricError::InvalidBand {
                        assessment_id: assessment_id.to_string(),
                        label: field.label.clone(),
                        band: band.name.clone(),
                        min: band.min,
                        max: band.max,
                    });
                }
            }
        }
        Ok(())
    }
}
