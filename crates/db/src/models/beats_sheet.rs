//! Beats sheet entity model and DTOs.

use beatsmith_core::story_plan::Beat;
use beatsmith_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A beats sheet row from the `beats_sheets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BeatsSheet {
    pub id: DbId,
    pub logline_id: DbId,
    pub story_plan_id: DbId,
    pub content: Json<Vec<Beat>>,
    pub created_at: Timestamp,
}

/// DTO for inserting a beats sheet. Content must already conform to the
/// referenced story plan.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBeatsSheet {
    pub logline_id: DbId,
    pub story_plan_id: DbId,
    pub content: Vec<Beat>,
}
