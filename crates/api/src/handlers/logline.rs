//! Handlers for the `/loglines` resource.
//!
//! Logline slugs are unique per user. A taken slug is resolved to the next
//! numbered variant by the logline creator.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use beatsmith_core::error::CoreError;
use beatsmith_core::types::DbId;
use beatsmith_db::models::logline::{CreateLogline, Logline};
use beatsmith_db::repositories::{BeatsSheetRepo, LoglineRepo};

use crate::error::AppResult;
use crate::handlers::{requested_slug, validate_body};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for creating a logline.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLoglineRequest {
    /// Requested slug. Derived from `name` when omitted.
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

/// Load one of the caller's loglines by slug.
pub(crate) async fn find_owned(state: &AppState, user_id: DbId, slug: &str) -> AppResult<Logline> {
    let logline = LoglineRepo::find_by_slug(&state.pool, user_id, slug)
        .await?
        .ok_or_else(|| CoreError::SlugNotFound {
            entity: "Logline",
            slug: slug.to_string(),
        })?;
    Ok(logline)
}

// ---------------------------------------------------------------------------
// POST /loglines
// ---------------------------------------------------------------------------

/// Create a logline for the caller.
///
/// Responds with the stored row, whose slug may be a numbered variant of
/// the one requested.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateLoglineRequest>,
) -> AppResult<impl IntoResponse> {
    validate_body(&body)?;
    let slug = requested_slug(body.slug, &body.name)?;

    let input = CreateLogline {
        user_id: auth.user_id,
        slug,
        name: body.name,
        content: body.content,
    };

    let store = state.logline_store();
    let logline = store.creator(state.config.slug_policy).create(input).await?;

    tracing::info!(
        logline_id = logline.id,
        user_id = logline.user_id,
        slug = %logline.slug,
        "Logline created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: logline })))
}

// ---------------------------------------------------------------------------
// GET /loglines
// ---------------------------------------------------------------------------

/// List the caller's loglines, newest first.
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> AppResult<impl IntoResponse> {
    let loglines = LoglineRepo::list_by_user(&state.pool, auth.user_id).await?;

    tracing::debug!(count = loglines.len(), user_id = auth.user_id, "Listed loglines");

    Ok(Json(DataResponse { data: loglines }))
}

// ---------------------------------------------------------------------------
// GET /loglines/{slug}
// ---------------------------------------------------------------------------

pub async fn get_by_slug(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let logline = find_owned(&state, auth.user_id, &slug).await?;
    Ok(Json(DataResponse { data: logline }))
}

// ---------------------------------------------------------------------------
// GET /loglines/{slug}/beats-sheets
// ---------------------------------------------------------------------------

/// List every beats sheet written for one of the caller's loglines.
pub async fn list_beats_sheets(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let logline = find_owned(&state, auth.user_id, &slug).await?;
    let sheets = BeatsSheetRepo::list_by_logline(&state.pool, logline.id).await?;
    Ok(Json(DataResponse { data: sheets }))
}
