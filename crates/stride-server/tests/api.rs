use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use stride_auth::jwt::TokenIssuer;
use stride_auth::password::hash_password_with_cost;
use stride_auth::users::{User, UserDirectory};
use stride_export::error::ExportError;
use stride_export::pdf::PdfRenderer;
use stride_export::render::ReportTemplates;
use stride_export::styles::ReportStyles;
use stride_rubric::ConfigRegistry;
use stride_server::middleware::rate_limit::{Decision, RateLimitConfig, RateLimiter};
use stride_server::middleware::security::SECURITY_HEADERS;
use stride_server::state::AppState;
use stride_storage::records::RecordStore;
use stride_storage::reports::ReportStore;

const TEST_COST: u32 = 4;
const PASSWORD: &str = "Secret1";

struct FakePdf;

#[async_trait]
impl PdfRenderer for FakePdf {
    async fn render(&self, html: &str) -> Result<Vec<u8>, ExportError> {
        Ok(format!("%PDF-1.4\n% {} bytes of html\n", html.len()).into_bytes())
    }
}

struct Harness {
    app: Router,
    tokens: Arc<TokenIssuer>,
    user: User,
    _dir: tempfile::TempDir,
}

impl Harness {
    async fn new() -> Self {
        Self::with_rate_limit(RateLimitConfig::default()).await
    }

    async fn with_rate_limit(limit: RateLimitConfig) -> Self {
        let dir = tempfile::tempdir().unwrap();

        let mut records: Vec<Value> =
            serde_json::from_str(include_str!("../data/sessions.json")).unwrap();
        records.push(json!({
            "session_id": "session_orphan",
            "assessment_id": "as_unconfigured",
            "timestamp": 1
        }));
        let records = RecordStore::from_json_str(&Value::Array(records).to_string()).unwrap();

        let users = UserDirectory::new();
        let hash = hash_password_with_cost(PASSWORD, TEST_COST).await.unwrap();
        let user = users.create("ana@example.com", "Ana Ruiz", hash).await.unwrap();

        let tokens = Arc::new(TokenIssuer::new(b"test-secret", TokenIssuer::DEFAULT_LIFETIME));

        let state = AppState {
            registry: Arc::new(ConfigRegistry::builtin()),
            records: Arc::new(records),
            reports: ReportStore::open(dir.path().join("reports")).await.unwrap(),
            templates: Arc::new(ReportTemplates::builtin().unwrap()),
            styles: Arc::new(ReportStyles::default()),
            pdf: Arc::new(FakePdf),
            users: Arc::new(users),
            tokens: tokens.clone(),
            bcrypt_cost: TEST_COST,
            rate_limiter: RateLimiter::new(limit),
        };

        Self {
            app: stride_server::app(state),
            tokens,
            user,
            _dir: dir,
        }
    }

    fn token(&self) -> String {
        self.tokens.issue(&self.user).unwrap()
    }

    async fn call(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.call(authed(Request::get(uri), &self.token()).body(Body::empty()).unwrap())
            .await
    }

    async fn post_json(&self, uri: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = authed(builder, token);
        }
        self.call(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }
}

fn authed(builder: axum::http::request::Builder, token: &str) -> axum::http::request::Builder {
    builder.header(header::AUTHORIZATION, format!("Bearer {token}"))
}

#[tokio::test]
async fn health_is_public() {
    let h = Harness::new().await;
    let (status, body) = h
        .call(Request::get("/api/health").body(Body::empty()).unwrap())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["service"], "Assessment Report Generation System");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn protected_routes_check_the_token() {
    let h = Harness::new().await;

    let (status, _) = h
        .call(Request::get("/api/reports/sessions").body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = h
        .call(
            authed(Request::get("/api/reports/sessions"), "garbage")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Token is expired or invalid");

    let stranger = User {
        id: "nobody".to_string(),
        email: "nobody@example.com".to_string(),
        name: "Nobody".to_string(),
        password_hash: String::new(),
        created_at: jiff::Timestamp::now(),
    };
    let token = h.tokens.issue(&stranger).unwrap();
    let (status, _) = h
        .call(
            authed(Request::get("/api/reports/sessions"), &token)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn register_then_use_token() {
    let h = Harness::new().await;

    let (status, body) = h
        .post_json(
            "/api/auth/register",
            json!({ "email": "New.User@Example.com", "password": "Passw0rd", "name": "New User" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "new.user@example.com");
    assert!(body["user"].get("password_hash").is_none());
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = h
        .call(
            authed(Request::get("/api/auth/profile"), &token)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "New User");

    let (status, body) = h.post_json("/api/auth/verify", json!({}), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Token is valid");

    let (status, _) = h
        .post_json(
            "/api/auth/register",
            json!({ "email": "new.user@example.com", "password": "Passw0rd", "name": "Again" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn register_reports_validation_details() {
    let h = Harness::new().await;
    let (status, body) = h
        .post_json(
            "/api/auth/register",
            json!({ "email": "bad", "password": "short", "name": "A" }),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn login_checks_password() {
    let h = Harness::new().await;

    let (status, body) = h
        .post_json(
            "/api/auth/login",
            json!({ "email": "ANA@example.com", "password": PASSWORD }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], h.user.id.as_str());
    assert!(body["token"].is_string());

    let (status, _) = h
        .post_json(
            "/api/auth/login",
            json!({ "email": "ana@example.com", "password": "Wrong1" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sessions_name_unconfigured_types_unknown() {
    let h = Harness::new().await;
    let (status, body) = h.get("/api/reports/sessions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    let sessions = body["sessions"].as_array().unwrap();
    assert_eq!(sessions[0]["session_id"], "session_001");
    assert_eq!(sessions[0]["assessment_name"], "Health & Fitness Assessment");
    assert_eq!(sessions[1]["assessment_name"], "Cardiac Assessment");
    assert_eq!(sessions[2]["assessment_name"], "Unknown");
    assert_eq!(sessions[0]["timestamp"], 1724337000000u64);
}

#[tokio::test]
async fn generate_list_download_delete() {
    let h = Harness::new().await;
    let token = h.token();

    let (status, body) = h
        .post_json(
            "/api/reports/generate",
            json!({ "session_id": "session_001" }),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let report = &body["report"];
    let filename = report["filename"].as_str().unwrap().to_string();
    assert!(filename.starts_with("as_hr_02_session_001_"));
    assert!(filename.ends_with(".pdf"));
    assert_eq!(report["assessment_type"], "Health & Fitness Assessment");
    assert_eq!(report["session_id"], "session_001");
    assert!(report["size"].as_u64().unwrap() > 0);

    let (status, body) = h.get("/api/reports/list").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["reports"][0]["filename"], filename.as_str());

    let resp = h
        .app
        .clone()
        .oneshot(
            authed(Request::get(format!("/api/reports/download/{filename}")), &token)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        resp.headers()[header::CONTENT_DISPOSITION].to_str().unwrap(),
        format!("attachment; filename=\"{filename}\"")
    );
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.starts_with(b"%PDF"));

    let (status, body) = h
        .call(
            authed(Request::delete(format!("/api/reports/{filename}")), &token)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = h.get(&format!("/api/reports/download/{filename}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = h.get("/api/reports/list").await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn generate_by_path() {
    let h = Harness::new().await;
    let (status, body) = h.get("/api/reports/generate/session_002").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["assessment_type"], "Cardiac Assessment");
    assert!(
        body["report"]["filename"]
            .as_str()
            .unwrap()
            .starts_with("as_card_01_session_002_")
    );
}

#[tokio::test]
async fn generate_reports_missing_data() {
    let h = Harness::new().await;
    let token = h.token();

    let (status, body) = h
        .post_json(
            "/api/reports/generate",
            json!({ "session_id": "no_such_session" }),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "No assessment data found for session ID: no_such_session"
    );

    let (status, body) = h.get("/api/reports/generate/session_orphan").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "No configuration found for assessment ID: as_unconfigured"
    );

    let (status, _) = h
        .post_json("/api/reports/generate", json!({}), Some(&token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn file_routes_reject_bad_names() {
    let h = Harness::new().await;

    let (status, _) = h.get("/api/reports/download/report.txt").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = h.get("/api/reports/download/bad%20name.pdf").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = h.get("/api/reports/download/missing.pdf").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = h
        .call(
            authed(Request::delete("/api/reports/missing.pdf"), &h.token())
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn config_lookup() {
    let h = Harness::new().await;

    let (status, body) = h.get("/api/reports/config/as_card_01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assessment_id"], "as_card_01");
    assert_eq!(body["config"]["name"], "Cardiac Assessment");
    assert_eq!(body["config"]["template"], "cardiac");

    let (status, _) = h.get("/api/reports/config/as_nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn from_client(uri: &str, ip: [u8; 4]) -> Request<Body> {
    let mut req = Request::get(uri).body(Body::empty()).unwrap();
    req.extensions_mut()
        .insert(ConnectInfo(SocketAddr::from((ip, 40000))));
    req
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let h = Harness::new().await;

    for req in [
        Request::get("/api/health").body(Body::empty()).unwrap(),
        Request::get("/api/reports/list").body(Body::empty()).unwrap(),
    ] {
        let resp = h.app.clone().oneshot(req).await.unwrap();
        for (name, value) in SECURITY_HEADERS {
            assert_eq!(
                resp.headers().get(*name).and_then(|v| v.to_str().ok()),
                Some(*value),
                "{name}"
            );
        }
    }
}

#[tokio::test]
async fn clients_over_the_limit_get_429() {
    let h = Harness::with_rate_limit(RateLimitConfig {
        max_requests: 2,
        window: Duration::from_secs(900),
    })
    .await;

    for _ in 0..2 {
        let resp = h
            .app
            .clone()
            .oneshot(from_client("/api/health", [10, 0, 0, 1]))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = h
        .app
        .clone()
        .oneshot(from_client("/api/health", [10, 0, 0, 1]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = resp.headers()[header::RETRY_AFTER]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((1..=900).contains(&retry_after));
    assert!(resp.headers().contains_key("x-content-type-options"));

    let resp = h
        .app
        .clone()
        .oneshot(from_client("/api/health", [10, 0, 0, 2]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn limiter_window_rolls_over() {
    let limiter = RateLimiter::new(RateLimitConfig {
        max_requests: 1,
        window: Duration::from_secs(60),
    });
    let start = Instant::now();

    assert_eq!(limiter.check_at("a", start).await, Decision::Allow);
    assert_eq!(
        limiter.check_at("a", start + Duration::from_secs(20)).await,
        Decision::Reject(Duration::from_secs(40))
    );
    assert_eq!(
        limiter.check_at("a", start + Duration::from_secs(60)).await,
        Decision::Allow
    );
}

#[test]
fn config_defaults_and_overrides() {
    use stride_server::config::ServerConfig;

    let defaults = ServerConfig::from_lookup(|_| None).unwrap();
    assert_eq!(defaults.port, 5000);
    assert_eq!(defaults.jwt_lifetime.as_secs(), 24 * 3600);
    assert_eq!(defaults.rate_limit_max_requests, 100);
    assert_eq!(defaults.rate_limit_window.as_secs(), 900);
    assert!(defaults.assessment_config.is_none());

    let custom = ServerConfig::from_lookup(|key| match key {
        "PORT" => Some("8080".to_string()),
        "JWT_EXPIRES_IN_HOURS" => Some("2".to_string()),
        "STRIDE_REPORTS_DIR" => Some("/var/reports".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(custom.port, 8080);
    assert_eq!(custom.jwt_lifetime.as_secs(), 7200);
    assert_eq!(custom.reports_dir, Path::new("/var/reports"));

    assert!(ServerConfig::from_lookup(|key| (key == "PORT").then(|| "x".to_string())).is_err());
}

#[tokio::test]
async fn startup_state_loads_from_disk() {
    use stride_server::config::ServerConfig;

    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("sessions.json");
    std::fs::write(&data, include_str!("../data/sessions.json")).unwrap();

    let mut config = ServerConfig::from_lookup(|_| None).unwrap();
    config.data_file = data;
    config.reports_dir = dir.path().join("out");
    config.bcrypt_cost = TEST_COST;

    let state = AppState::from_config(&config).await.unwrap();
    assert_eq!(state.records.all().len(), 2);
    assert_eq!(state.registry.len(), 2);
    assert!(dir.path().join("out").is_dir());
}
