use std::path::PathBuf;
use std::time::Duration;

use eyre::WrapErr;

const DEFAULT_JWT_SECRET: &str = "your-super-secret-jwt-key-change-in-production";

/// Runtime settings, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_lifetime: Duration,
    /// JSON array of assessment records.
    pub data_file: PathBuf,
    /// Optional JSON file replacing the built-in assessment configurations.
    pub assessment_config: Option<PathBuf>,
    pub reports_dir: PathBuf,
    /// Optional directory of `<template>.html.tera` overrides.
    pub templates_dir: Option<PathBuf>,
    pub chromium: PathBuf,
    pub bcrypt_cost: u32,
    /// Requests allowed per client IP in each rate-limit window.
    pub rate_limit_max_requests: u64,
    pub rate_limit_window: Duration,
}

impl ServerConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .wrap_err_with(|| format!("PORT is not a valid port: {raw}"))?,
            None => 5000,
        };

        let jwt_lifetime_hours: u64 = match get("JWT_EXPIRES_IN_HOURS") {
            Some(raw) => raw
                .trim()
                .parse()
                .wrap_err_with(|| format!("JWT_EXPIRES_IN_HOURS is not a number: {raw}"))?,
            None => 24,
        };

        let rate_limit_max_requests: u64 = match get("RATE_LIMIT_MAX_REQUESTS") {
            Some(raw) => raw
                .trim()
                .parse()
                .wrap_err_with(|| format!("RATE_LIMIT_MAX_REQUESTS is not a number: {raw}"))?,
            None => 100,
        };

        let rate_limit_window_secs: u64 = match get("RATE_LIMIT_WINDOW_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .wrap_err_with(|| format!("RATE_LIMIT_WINDOW_SECS is not a number: {raw}"))?,
            None => 15 * 60,
        };

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set, using the development secret");
            DEFAULT_JWT_SECRET.to_string()
        });

        Ok(Self {
            port,
            jwt_secret,
            jwt_lifetime: Duration::from_secs(jwt_lifetime_hours * 60 * 60),
            data_file: get("STRIDE_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/sessions.json")),
            assessment_config: get("STRIDE_ASSESSMENT_CONFIG").map(PathBuf::from),
            reports_dir: get("STRIDE_REPORTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("generated-reports")),
            templates_dir: get("STRIDE_TEMPLATES_DIR").map(PathBuf::from),
            chromium: get("STRIDE_CHROMIUM")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("chromium")),
            bcrypt_cost: stride_auth::password::DEFAULT_COST,
            rate_limit_max_requests,
            rate_limit_window: Duration::from_secs(rate_limit_window_secs),
        })
    }
}
