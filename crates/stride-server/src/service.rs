//! Report generation, shared by the POST and GET generate routes.

use stride_core::artifact_names::report_filename;
use stride_core::models::artifact::GeneratedReport;
use stride_rubric::assemble;

use crate::error::ApiError;
use crate::state::AppState;

/// Assemble, render and persist the report for one session.
///
/// The PDF is fully written before this returns, so the reported size is
/// final.
pub async fn generate_report(
    state: &AppState,
    session_id: &str,
) -> Result<GeneratedReport, ApiError> {
    let record = state.records.find(session_id).ok_or_else(|| {
        ApiError::NotFound(format!(
            "No assessment data found for session ID: {session_id}"
        ))
    })?;

    let assessment_id = record.assessment_id();
    let config = state.registry.get(assessment_id).ok_or_else(|| {
        ApiError::NotFound(format!(
            "No configuration found for assessment ID: {assessment_id}"
        ))
    })?;

    let generated_at = jiff::Timestamp::now();
    let report = assemble(config, record, generated_at);
    let html = state.templates.render(&report, &state.styles)?;
    let pdf = state.pdf.render(&html).await?;

    let filename = report_filename(assessment_id, session_id, generated_at);
    let info = state.reports.save(&filename, &pdf).await?;
    let path = state.reports.path_for(&filename)?;

    tracing::info!(
        session_id,
        assessment_id,
        filename = %filename,
        size = info.size,
        "report generated"
    );

    Ok(GeneratedReport {
        filename,
        path: path.display().to_string(),
        size: info.size,
        assessment_type: config.name.clone(),
        session_id: session_id.to_string(),
        generated_at,
    })
}
