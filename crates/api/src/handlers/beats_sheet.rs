//! Handlers for the `/beats-sheets` resource.
//!
//! Every write is gated by `check_story_plan`: the submitted beats must
//! match the story plan's beat definitions position by position before
//! anything is persisted. Regenerating a sheet stores a new row against the
//! same story plan row.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use beatsmith_core::error::CoreError;
use beatsmith_core::story_plan::{check_story_plan, Beat};
use beatsmith_core::types::DbId;
use beatsmith_db::models::beats_sheet::{BeatsSheet, CreateBeatsSheet};
use beatsmith_db::models::logline::Logline;
use beatsmith_db::repositories::{BeatsSheetRepo, LoglineRepo, StoryPlanRepo};

use crate::error::AppResult;
use crate::handlers::story_plan::find_current;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for creating a beats sheet.
#[derive(Debug, Deserialize)]
pub struct CreateBeatsSheetRequest {
    /// Slug of one of the caller's loglines.
    pub logline_slug: String,
    /// Slug of the story plan; its current row is the template.
    pub story_plan_slug: String,
    pub content: Vec<Beat>,
}

/// Request body for regenerating a beats sheet.
#[derive(Debug, Deserialize)]
pub struct RegenerateBeatsSheetRequest {
    pub content: Vec<Beat>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a beats sheet and the logline it belongs to, if the caller owns it.
///
/// Sheets of other users' loglines are reported as not found.
async fn find_owned_sheet(
    state: &AppState,
    user_id: DbId,
    id: DbId,
) -> AppResult<(BeatsSheet, Logline)> {
    let not_found = || CoreError::NotFound {
        entity: "BeatsSheet",
        id,
    };

    let sheet = BeatsSheetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;

    let logline = LoglineRepo::find_by_id(&state.pool, sheet.logline_id)
        .await?
        .filter(|logline| logline.user_id == user_id)
        .ok_or_else(not_found)?;

    Ok((sheet, logline))
}

// ---------------------------------------------------------------------------
// POST /beats-sheets
// ---------------------------------------------------------------------------

/// Create a beats sheet for one of the caller's loglines.
///
/// Responds 422 if the content does not follow the story plan.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateBeatsSheetRequest>,
) -> AppResult<impl IntoResponse> {
    let logline =
        crate::handlers::logline::find_owned(&state, auth.user_id, &body.logline_slug).await?;
    let plan = find_current(&state, &body.story_plan_slug).await?;

    check_story_plan(&body.content, &plan.beats.0)?;

    let input = CreateBeatsSheet {
        logline_id: logline.id,
        story_plan_id: plan.id,
        content: body.content,
    };
    let sheet = BeatsSheetRepo::create(&state.pool, &input).await?;

    tracing::info!(
        beats_sheet_id = sheet.id,
        logline_id = logline.id,
        story_plan_id = plan.id,
        "Beats sheet created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: sheet })))
}

// ---------------------------------------------------------------------------
// GET /beats-sheets/{id}
// ---------------------------------------------------------------------------

pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (sheet, _) = find_owned_sheet(&state, auth.user_id, id).await?;
    Ok(Json(DataResponse { data: sheet }))
}

// ---------------------------------------------------------------------------
// PUT /beats-sheets/{id}
// ---------------------------------------------------------------------------

/// Store regenerated content for a beats sheet as a new row.
///
/// The content is checked against the same story plan row the original
/// sheet was written for.
pub async fn regenerate(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(body): Json<RegenerateBeatsSheetRequest>,
) -> AppResult<impl IntoResponse> {
    let (previous, logline) = find_owned_sheet(&state, auth.user_id, id).await?;

    let plan = StoryPlanRepo::find_by_id(&state.pool, previous.story_plan_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "StoryPlan",
            id: previous.story_plan_id,
        })?;

    check_story_plan(&body.content, &plan.beats.0)?;

    let input = CreateBeatsSheet {
        logline_id: logline.id,
        story_plan_id: plan.id,
        content: body.content,
    };
    let sheet = BeatsSheetRepo::create(&state.pool, &input).await?;

    tracing::info!(
        beats_sheet_id = sheet.id,
        previous_id = previous.id,
        logline_id = logline.id,
        "Beats sheet regenerated"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: sheet })))
}
