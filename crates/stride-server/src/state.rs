use std::sync::Arc;

use eyre::WrapErr;

use stride_auth::jwt::TokenIssuer;
use stride_auth::users::UserDirectory;
use stride_export::pdf::{ChromiumRenderer, PdfRenderer};
use stride_export::render::ReportTemplates;
use stride_export::styles::ReportStyles;
use stride_rubric::ConfigRegistry;
use stride_storage::records::RecordStore;
use stride_storage::reports::ReportStore;

use crate::config::ServerConfig;
use crate::middleware::rate_limit::{RateLimitConfig, RateLimiter};

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ConfigRegistry>,
    pub records: Arc<RecordStore>,
    pub reports: ReportStore,
    pub templates: Arc<ReportTemplates>,
    pub styles: Arc<ReportStyles>,
    pub pdf: Arc<dyn PdfRenderer>,
    pub users: Arc<UserDirectory>,
    pub tokens: Arc<TokenIssuer>,
    pub bcrypt_cost: u32,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Load every store and template the server needs.
    pub async fn from_config(config: &ServerConfig) -> eyre::Result<Self> {
        let registry = match &config.assessment_config {
            Some(path) => ConfigRegistry::from_json_file(path)?,
            None => ConfigRegistry::builtin(),
        };

        let records = RecordStore::load(&config.data_file)
            .await
            .wrap_err("failed to load assessment records")?;

        let reports = ReportStore::open(&config.reports_dir).await?;

        let templates = match &config.templates_dir {
            Some(dir) => ReportTemplates::with_overrides(dir)?,
            None => ReportTemplates::builtin()?,
        };
        for (id, assessment) in registry.iter() {
            if !templates.has_template(&assessment.template) {
                tracing::warn!(
                    assessment_id = id,
                    template = %assessment.template,
                    "assessment references an unknown template"
                );
            }
        }

        let users = UserDirectory::with_demo_user(config.bcrypt_cost).await?;

        Ok(Self {
            registry: Arc::new(registry),
            records: Arc::new(records),
            reports,
            templates: Arc::new(templates),
            styles: Arc::new(ReportStyles::default()),
            pdf: Arc::new(ChromiumRenderer::new(&config.chromium)),
            users: Arc::new(users),
            tokens: Arc::new(TokenIssuer::new(
                config.jwt_secret.as_bytes(),
                config.jwt_lifetime,
            )),
            bcrypt_cost: config.bcrypt_cost,
            rate_limiter: RateLimiter::new(RateLimitConfig {
                max_requests: config.rate_limit_max_requests,
                window: config.rate_limit_window,
            }),
        })
    }
}
