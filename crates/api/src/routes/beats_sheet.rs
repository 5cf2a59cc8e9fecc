//! Route definitions for the `/beats-sheets` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::beats_sheet;
use crate::state::AppState;

/// Routes mounted at `/beats-sheets`.
///
/// ```text
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> regenerate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(beats_sheet::create))
        .route(
            "/{id}",
            get(beats_sheet::get_by_id).put(beats_sheet::regenerate),
        )
}
