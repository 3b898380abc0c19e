//! API handlers for Shelfnotes endpoints

pub mod auth;
pub mod books;
pub mod health;
pub mod openapi;
pub mod pages;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::{error::AppError, AppState};

/// Session key holding the authenticated user's id
pub const SESSION_USER_KEY: &str = "user_id";

/// Extractor for the authenticated user's id from the server-side session.
///
/// API routes reject requests without a bound session with a 401 JSON
/// error; page routes check the session themselves and redirect instead.
pub struct CurrentUser(pub i32);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(msg.to_string()))?;

        let user_id: Option<i32> = session.get(SESSION_USER_KEY).await?;

        user_id
            .map(CurrentUser)
            .ok_or_else(|| AppError::Unauthenticated("Not logged in".to_string()))
    }
}
