use serde::{Deserialize, Serialize};
use ts_rs::TS;

use stride_core::models::record::AssessmentRecord;

use crate::classify::{classify, Classification};
use crate::config::{AssessmentConfig, FieldSpec, Section};

/// Shown in place of a value that could not be extracted.
pub const NOT_AVAILABLE: &str = "N/A";

/// Display-ready output for one configured measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResolvedField {
    pub label: String,
    pub value: Option<String>,
    pub unit: String,
    pub classification: Option<Classification>,
    pub display_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResolvedSection {
    pub id: String,
    pub title: String,
    pub fields: Vec<ResolvedField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportMetadata {
    pub session_id: String,
    pub assessment_id: String,
    /// Source timestamp exactly as the capturing system recorded it.
    pub timestamp: serde_json::Value,
    pub generated_at: jiff::Timestamp,
}

/// Normalized payload handed to a report template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProcessedReport {
    pub assessment_name: String,
    pub template: String,
    pub sections: Vec<ResolvedSection>,
    pub metadata: ReportMetadata,
}

/// Resolve every configured field of `config` against `record`.
///
/// Sections and fields keep configuration order. The function is pure apart
/// from the caller-supplied `generated_at`.
pub fn assemble(
    config: &AssessmentConfig,
    record: &AssessmentRecord,
    generated_at: jiff::Timestamp,
) -> ProcessedReport {
    let sections = config
        .sections
        .iter()
        .map(|section| resolve_section(section, record))
        .collect();

    ProcessedReport {
        assessment_name: config.name.clone(),
        template: config.template.clone(),
        sections,
        metadata: ReportMetadata {
            session_id: record.session_id().to_string(),
            assessment_id: record.assessment_id().to_string(),
            timestamp: record.timestamp(),
            generated_at,
        },
    }
}

/// [`assemble`] stamped with the current time.
pub fn assemble_now(config: &AssessmentConfig, record: &AssessmentRecord) -> ProcessedReport {
    assemble(config, record, jiff::Timestamp::now())
}

fn resolve_section(section: &Section, record: &AssessmentRecord) -> ResolvedSection {
    ResolvedSection {
        id: section.id.clone(),
        title: section.title.clone(),
        fields: section
            .fields
            .iter()
            .map(|field| resolve_field(field, record))
            .collect(),
    }
}

fn resolve_field(field: &FieldSpec, record: &AssessmentRecord) -> ResolvedField {
    let value = field.path.resolve(record.document());
    let classification = classify(value.as_deref(), &field.classification);
    let display_value = match value.as_deref() {
        Some(v) if !v.is_empty() => format!("{v} {}", field.unit),
        _ => NOT_AVAILABLE.to_string(),
    };

    ResolvedField {
        label: field.label.clone(),
        value,
        unit: field.unit.clone(),
        classification,
        display_value,
    }
}
