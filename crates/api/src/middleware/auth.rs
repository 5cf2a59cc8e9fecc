//! Caller identity extractor for Axum handlers.
//!
//! Authentication happens upstream: the gateway verifies the session and
//! forwards the caller's user id in the [`USER_ID_HEADER`] header. This
//! service only reads it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use beatsmith_core::error::CoreError;
use beatsmith_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the authenticated user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Authenticated caller extracted from the [`USER_ID_HEADER`] header.
///
/// Use this as an extractor parameter in any handler that requires a caller:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {USER_ID_HEADER} header"
                )))
            })?;

        let user_id = raw
            .trim()
            .parse::<DbId>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Invalid {USER_ID_HEADER} header"
                )))
            })?;

        Ok(AuthUser { user_id })
    }
}
