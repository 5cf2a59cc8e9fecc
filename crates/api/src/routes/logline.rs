//! Route definitions for the `/loglines` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::logline;
use crate::state::AppState;

/// Routes mounted at `/loglines`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{slug}                    -> get_by_slug
/// GET    /{slug}/beats-sheets       -> list_beats_sheets
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(logline::list).post(logline::create))
        .route("/{slug}", get(logline::get_by_slug))
        .route("/{slug}/beats-sheets", get(logline::list_beats_sheets))
}
