use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;

use stride_auth::password;
use stride_auth::users::PublicUser;
use stride_auth::validate::{validate_login, validate_registration, LoginInput, RegisterInput};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionResponse {
    pub message: &'static str,
    pub user: PublicUser,
    pub token: String,
}

#[derive(Serialize)]
pub struct CurrentUserResponse {
    pub message: &'static str,
    pub user: AuthUser,
}

pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let registration = validate_registration(&input).map_err(ApiError::Validation)?;

    if state.users.find_by_email(&registration.email).await.is_some() {
        return Err(ApiError::Conflict(
            "A user with this email address already exists".to_string(),
        ));
    }

    let hash = password::hash_password_with_cost(&registration.password, state.bcrypt_cost).await?;
    let user = state
        .users
        .create(&registration.email, &registration.name, hash)
        .await?;
    let token = state.tokens.issue(&user)?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            message: "User registered successfully",
            user: PublicUser::from(&user),
            token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<SessionResponse>, ApiError> {
    let credentials = validate_login(&input).map_err(ApiError::Validation)?;
    let user = state
        .users
        .authenticate(&credentials.email, &credentials.password)
        .await?;
    let token = state.tokens.issue(&user)?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(SessionResponse {
        message: "Login successful",
        user: PublicUser::from(&user),
        token,
    }))
}

pub async fn profile(Extension(user): Extension<AuthUser>) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        message: "Profile retrieved successfully",
        user,
    })
}

pub async fn verify(Extension(user): Extension<AuthUser>) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        message: "Token is valid",
        user,
    })
}
