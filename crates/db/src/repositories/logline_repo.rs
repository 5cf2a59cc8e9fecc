//! Repository for the `loglines` table.

use beatsmith_core::slug::variant_pattern;
use beatsmith_core::slug_resolver::IterationOrder;
use beatsmith_core::types::DbId;
use sqlx::PgPool;

use crate::models::logline::{CreateLogline, Logline};
use crate::repositories::variant_order_clause;

const COLUMNS: &str = "id, user_id, slug, name, content, created_at";

/// Provides insert and lookup operations for loglines.
pub struct LoglineRepo;

impl LoglineRepo {
    /// Insert a new logline, returning the created row.
    ///
    /// Fails with a `uq_loglines_user_id_slug` unique violation if the user
    /// already owns a logline with this slug.
    pub async fn create(pool: &PgPool, input: &CreateLogline) -> Result<Logline, sqlx::Error> {
        let query = format!(
            "INSERT INTO loglines (user_id, slug, name, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Logline>(&query)
            .bind(input.user_id)
            .bind(&input.slug)
            .bind(&input.name)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find a logline by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Logline>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM loglines WHERE id = $1");
        sqlx::query_as::<_, Logline>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find one of a user's loglines by slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        user_id: DbId,
        slug: &str,
    ) -> Result<Option<Logline>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM loglines WHERE user_id = $1 AND slug = $2");
        sqlx::query_as::<_, Logline>(&query)
            .bind(user_id)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List a user's loglines, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Logline>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM loglines
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Logline>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Return the slug of the user's top-ranked `{base}-N` logline.
    pub async fn find_latest_variant(
        pool: &PgPool,
        user_id: DbId,
        base: &str,
        order: IterationOrder,
    ) -> Result<Option<String>, sqlx::Error> {
        let query = format!(
            "SELECT slug FROM loglines
             WHERE user_id = $1 AND slug ~ $2
             {}
             LIMIT 1",
            variant_order_clause(order)
        );
        sqlx::query_scalar::<_, String>(&query)
            .bind(user_id)
            .bind(variant_pattern(base))
            .fetch_optional(pool)
            .await
    }
}
