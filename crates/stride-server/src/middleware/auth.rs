use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use serde::Serialize;

use stride_auth::error::AuthError;

use crate::error::ApiError;
use crate::state::AppState;

/// JWT validation middleware.
///
/// Extracts the `Authorization: Bearer <token>` header, verifies the token
/// and checks that its user still exists. On success, inserts [`AuthUser`]
/// into request extensions for handlers to use.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("No token provided".to_string()))?;

    let claims = state.tokens.validate(token)?;
    if state.users.find_by_id(&claims.sub).await.is_none() {
        return Err(AuthError::UserNotFound(claims.sub).into());
    }

    req.extensions_mut().insert(AuthUser {
        id: claims.sub,
        email: claims.email,
        name: claims.name,
        iat: claims.iat,
        exp: claims.exp,
    });

    Ok(next.run(req).await)
}

/// Authenticated user extracted from JWT claims.
#[derive(Clone, Debug, Serialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub iat: u64,
    pub exp: u64,
}
