pub mod beats_sheet;
pub mod health;
pub mod logline;
pub mod story_plan;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /loglines                                  list, create
/// /loglines/{slug}                           get
/// /loglines/{slug}/beats-sheets              list sheets for a logline
///
/// /story-plans                               list current, create
/// /story-plans/{slug}                        get current, update (new iteration)
/// /story-plans/{slug}/iterations             list iterations
///
/// /beats-sheets                              create (checked against story plan)
/// /beats-sheets/{id}                         get, regenerate
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/loglines", logline::router())
        .nest("/story-plans", story_plan::router())
        .nest("/beats-sheets", beats_sheet::router())
}
