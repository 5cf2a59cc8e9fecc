//! Repository for the `beats_sheets` table.

use beatsmith_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::beats_sheet::{BeatsSheet, CreateBeatsSheet};

const COLUMNS: &str = "id, logline_id, story_plan_id, content, created_at";

pub struct BeatsSheetRepo;

impl BeatsSheetRepo {
    /// Insert a beats sheet. Callers check the content against the story
    /// plan before calling this.
    pub async fn create(
        pool: &PgPool,
        input: &CreateBeatsSheet,
    ) -> Result<BeatsSheet, sqlx::Error> {
        let query = format!(
            "INSERT INTO beats_sheets (logline_id, story_plan_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BeatsSheet>(&query)
            .bind(input.logline_id)
            .bind(input.story_plan_id)
            .bind(Json(&input.content))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BeatsSheet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM beats_sheets WHERE id = $1");
        sqlx::query_as::<_, BeatsSheet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every sheet written for a logline, newest first.
    pub async fn list_by_logline(
        pool: &PgPool,
        logline_id: DbId,
    ) -> Result<Vec<BeatsSheet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM beats_sheets
             WHERE logline_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, BeatsSheet>(&query)
            .bind(logline_id)
            .fetch_all(pool)
            .await
    }
}
