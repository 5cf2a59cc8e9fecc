//! Route definitions for the `/story-plans` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::story_plan;
use crate::state::AppState;

/// Routes mounted at `/story-plans`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{slug}                    -> get_by_slug
/// PUT    /{slug}                    -> update
/// GET    /{slug}/iterations         -> list_iterations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(story_plan::list).post(story_plan::create))
        .route(
            "/{slug}",
            get(story_plan::get_by_slug).put(story_plan::update),
        )
        .route("/{slug}/iterations", get(story_plan::list_iterations))
}
