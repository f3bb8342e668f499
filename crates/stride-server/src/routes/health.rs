use axum::Json;
use serde::Serialize;

pub const SERVICE_NAME: &str = "Assessment Report Generation System";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: jiff::Timestamp,
    pub service: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: jiff::Timestamp::now(),
        service: SERVICE_NAME,
    })
}
