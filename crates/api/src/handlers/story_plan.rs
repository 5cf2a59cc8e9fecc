//! Handlers for the `/story-plans` resource.
//!
//! Story plan slugs are globally unique. Creating a plan reserves its slug
//! (resolving conflicts to numbered variants); updating a plan inserts a new
//! immutable row under the existing slug.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use beatsmith_core::error::CoreError;
use beatsmith_core::story_plan::{validate_beat_definitions, BeatDefinition};
use beatsmith_db::models::story_plan::{CreateStoryPlan, StoryPlan, UpdateStoryPlan};
use beatsmith_db::repositories::StoryPlanRepo;

use crate::error::AppResult;
use crate::handlers::{requested_slug, validate_body};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for creating a story plan.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStoryPlanRequest {
    /// Requested slug. Derived from `name` when omitted.
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub beats: Vec<BeatDefinition>,
}

/// Request body for a new iteration of an existing story plan.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStoryPlanRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub beats: Vec<BeatDefinition>,
}

/// Load the current row of the story plan registered under `slug`.
pub(crate) async fn find_current(state: &AppState, slug: &str) -> AppResult<StoryPlan> {
    let plan = StoryPlanRepo::find_current_by_slug(&state.pool, slug)
        .await?
        .ok_or_else(|| CoreError::SlugNotFound {
            entity: "StoryPlan",
            slug: slug.to_string(),
        })?;
    Ok(plan)
}

// ---------------------------------------------------------------------------
// POST /story-plans
// ---------------------------------------------------------------------------

/// Create a story plan under a new slug.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateStoryPlanRequest>,
) -> AppResult<impl IntoResponse> {
    validate_body(&body)?;
    validate_beat_definitions(&body.beats)?;
    let slug = requested_slug(body.slug, &body.name)?;

    let input = CreateStoryPlan {
        slug,
        name: body.name,
        description: body.description,
        beats: body.beats,
    };

    let store = state.story_plan_store();
    let plan = store.creator(state.config.slug_policy).create(input).await?;

    tracing::info!(
        story_plan_id = plan.id,
        slug = %plan.slug,
        beat_count = plan.beats.0.len(),
        user_id = auth.user_id,
        "Story plan created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: plan })))
}

// ---------------------------------------------------------------------------
// GET /story-plans
// ---------------------------------------------------------------------------

/// List the current row of every story plan.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let plans = StoryPlanRepo::list_current(&state.pool).await?;
    Ok(Json(DataResponse { data: plans }))
}

// ---------------------------------------------------------------------------
// GET /story-plans/{slug}
// ---------------------------------------------------------------------------

pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let plan = find_current(&state, &slug).await?;
    Ok(Json(DataResponse { data: plan }))
}

// ---------------------------------------------------------------------------
// PUT /story-plans/{slug}
// ---------------------------------------------------------------------------

/// Store a new iteration of an existing story plan.
///
/// Beats sheets already written keep pointing at the row they were checked
/// against.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
    Json(body): Json<UpdateStoryPlanRequest>,
) -> AppResult<impl IntoResponse> {
    validate_body(&body)?;
    validate_beat_definitions(&body.beats)?;

    let previous = find_current(&state, &slug).await?;

    let input = UpdateStoryPlan {
        name: body.name,
        description: body.description,
        beats: body.beats,
    };
    let plan = StoryPlanRepo::create_iteration(&state.pool, &slug, &input).await?;

    tracing::info!(
        story_plan_id = plan.id,
        previous_id = previous.id,
        slug = %plan.slug,
        user_id = auth.user_id,
        "Story plan iterated"
    );

    Ok(Json(DataResponse { data: plan }))
}

// ---------------------------------------------------------------------------
// GET /story-plans/{slug}/iterations
// ---------------------------------------------------------------------------

/// List every stored iteration of a story plan, newest first.
pub async fn list_iterations(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let plans = StoryPlanRepo::list_iterations(&state.pool, &slug).await?;
    if plans.is_empty() {
        return Err(CoreError::SlugNotFound {
            entity: "StoryPlan",
            slug,
        }
        .into());
    }
    Ok(Json(DataResponse { data: plans }))
}
