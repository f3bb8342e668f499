use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use stride_auth::validate::validate_session_id;
use stride_core::artifact_names::{is_valid_report_filename, PDF_CONTENT_TYPE};
use stride_core::models::artifact::{GeneratedReport, ReportInfo};
use stride_core::models::session::SessionSummary;
use stride_rubric::AssessmentConfig;

use crate::error::ApiError;
use crate::service;
use crate::state::AppState;

const UNKNOWN_ASSESSMENT: &str = "Unknown";

#[derive(Serialize)]
pub struct SessionList {
    pub message: &'static str,
    pub sessions: Vec<SessionSummary>,
    pub count: usize,
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub session_id: String,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub message: &'static str,
    pub report: GeneratedReport,
}

#[derive(Serialize)]
pub struct ReportList {
    pub message: &'static str,
    pub reports: Vec<ReportInfo>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub success: bool,
}

#[derive(Serialize)]
pub struct ConfigResponse {
    pub message: &'static str,
    pub assessment_id: String,
    pub config: AssessmentConfig,
}

pub async fn list_sessions(State(state): State<AppState>) -> Json<SessionList> {
    let sessions: Vec<SessionSummary> = state
        .records
        .all()
        .iter()
        .map(|record| SessionSummary {
            session_id: record.session_id().to_string(),
            assessment_id: record.assessment_id().to_string(),
            assessment_name: state
                .registry
                .get(record.assessment_id())
                .map(|c| c.name.clone())
                .unwrap_or_else(|| UNKNOWN_ASSESSMENT.to_string()),
            timestamp: record.timestamp(),
        })
        .collect();

    Json(SessionList {
        message: "Available sessions retrieved successfully",
        count: sessions.len(),
        sessions,
    })
}

pub async fn generate_from_body(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    generate(&state, &req.session_id).await
}

pub async fn generate_from_path(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<GenerateResponse>, ApiError> {
    generate(&state, &session_id).await
}

async fn generate(state: &AppState, session_id: &str) -> Result<Json<GenerateResponse>, ApiError> {
    validate_session_id(session_id).map_err(ApiError::Validation)?;
    let report = service::generate_report(state, session_id).await?;
    Ok(Json(GenerateResponse {
        message: "Report generated successfully",
        report,
    }))
}

pub async fn list_reports(State(state): State<AppState>) -> Result<Json<ReportList>, ApiError> {
    let reports = state.reports.list().await?;
    Ok(Json(ReportList {
        message: "Generated reports retrieved successfully",
        count: reports.len(),
        reports,
    }))
}

pub async fn download_report(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    check_filename(&filename)?;
    let info = state.reports.info(&filename).await?;
    let bytes = state.reports.read(&filename).await?;

    Ok((
        [
            (CONTENT_TYPE, PDF_CONTENT_TYPE.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
            (CONTENT_LENGTH, info.size.to_string()),
        ],
        Body::from(bytes),
    )
        .into_response())
}

pub async fn delete_report(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    check_filename(&filename)?;
    state.reports.delete(&filename).await?;
    Ok(Json(DeleteResponse {
        message: format!("Report deleted: {filename}"),
        success: true,
    }))
}

pub async fn get_config(
    State(state): State<AppState>,
    Path(assessment_id): Path<String>,
) -> Result<Json<ConfigResponse>, ApiError> {
    let config = state.registry.get(&assessment_id).ok_or_else(|| {
        ApiError::NotFound(format!(
            "No configuration found for assessment ID: {assessment_id}"
        ))
    })?;

    Ok(Json(ConfigResponse {
        message: "Assessment configuration retrieved successfully",
        config: config.clone(),
        assessment_id,
    }))
}

fn check_filename(filename: &str) -> Result<(), ApiError> {
    if is_valid_report_filename(filename) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(
            "Filename contains invalid characters".to_string(),
        ))
    }
}
