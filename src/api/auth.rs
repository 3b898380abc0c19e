//! Authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tower_sessions::Session;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::user::Credentials,
    AppState,
};

use super::SESSION_USER_KEY;

/// Confirmation message body
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<Credentials>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    state.services.auth.signup(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Signup successful".to_string(),
        }),
    ))
}

/// Log in and establish a server-side session
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "Logged in, session cookie set", body = MessageResponse),
        (status = 400, description = "Unknown user or wrong password", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<Credentials>,
) -> AppResult<Json<MessageResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = state.services.auth.login(&payload).await?;

    // Rotate the session id when the session gains a user
    session.cycle_id().await?;
    session.insert(SESSION_USER_KEY, user.id).await?;

    Ok(Json(MessageResponse {
        message: "Login successful".to_string(),
    }))
}

/// Destroy the server-side session.
///
/// A failed destroy is logged; the confirmation is returned regardless.
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session destroyed", body = MessageResponse)
    )
)]
pub async fn logout(session: Session) -> Json<MessageResponse> {
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to destroy session: {}", e);
    }

    Json(MessageResponse {
        message: "Logout successful".to_string(),
    })
}
