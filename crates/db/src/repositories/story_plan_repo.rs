//! Repository for the `story_plans` and `story_plan_slugs` tables.

use beatsmith_core::slug::variant_pattern;
use beatsmith_core::slug_resolver::IterationOrder;
use beatsmith_core::story_plan::BeatDefinition;
use beatsmith_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::story_plan::{CreateStoryPlan, StoryPlan, UpdateStoryPlan};
use crate::repositories::variant_order_clause;

const COLUMNS: &str = "id, slug, name, description, beats, created_at";

/// Provides insert and lookup operations for story plans.
pub struct StoryPlanRepo;

impl StoryPlanRepo {
    /// Reserve `input.slug` and insert the first row of a new story plan.
    ///
    /// Both writes share one transaction. A taken slug fails the reservation
    /// with a `uq_story_plan_slugs_slug` unique violation and nothing is
    /// written.
    pub async fn create(pool: &PgPool, input: &CreateStoryPlan) -> Result<StoryPlan, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("INSERT INTO story_plan_slugs (slug) VALUES ($1)")
            .bind(&input.slug)
            .execute(&mut *tx)
            .await?;

        let plan = Self::insert_row(
            &mut *tx,
            &input.slug,
            &input.name,
            input.description.as_deref(),
            &input.beats,
        )
        .await?;

        tx.commit().await?;
        Ok(plan)
    }

    /// Insert a new iteration of the story plan registered under `slug`.
    ///
    /// Fails with a foreign key violation if `slug` was never reserved.
    pub async fn create_iteration(
        pool: &PgPool,
        slug: &str,
        input: &UpdateStoryPlan,
    ) -> Result<StoryPlan, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::insert_row(
            &mut conn,
            slug,
            &input.name,
            input.description.as_deref(),
            &input.beats,
        )
        .await
    }

    async fn insert_row(
        conn: &mut sqlx::PgConnection,
        slug: &str,
        name: &str,
        description: Option<&str>,
        beats: &[BeatDefinition],
    ) -> Result<StoryPlan, sqlx::Error> {
        let query = format!(
            "INSERT INTO story_plans (slug, name, description, beats)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StoryPlan>(&query)
            .bind(slug)
            .bind(name)
            .bind(description)
            .bind(Json(beats))
            .fetch_one(conn)
            .await
    }

    /// Find a story plan row by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StoryPlan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM story_plans WHERE id = $1");
        sqlx::query_as::<_, StoryPlan>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the current (most recently created) row for `slug`.
    pub async fn find_current_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<StoryPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM story_plans
             WHERE slug = $1
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, StoryPlan>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List every iteration stored under `slug`, newest first.
    pub async fn list_iterations(pool: &PgPool, slug: &str) -> Result<Vec<StoryPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM story_plans
             WHERE slug = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, StoryPlan>(&query)
            .bind(slug)
            .fetch_all(pool)
            .await
    }

    /// List the current row of every story plan, ordered by slug.
    pub async fn list_current(pool: &PgPool) -> Result<Vec<StoryPlan>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (slug) {COLUMNS} FROM story_plans
             ORDER BY slug ASC, created_at DESC, id DESC"
        );
        sqlx::query_as::<_, StoryPlan>(&query).fetch_all(pool).await
    }

    /// Return the top-ranked reserved `{base}-N` story plan slug.
    pub async fn find_latest_variant(
        pool: &PgPool,
        base: &str,
        order: IterationOrder,
    ) -> Result<Option<String>, sqlx::Error> {
        let query = format!(
            "SELECT slug FROM story_plan_slugs
             WHERE slug ~ $1
             {}
             LIMIT 1",
            variant_order_clause(order)
        );
        sqlx::query_scalar::<_, String>(&query)
            .bind(variant_pattern(base))
            .fetch_optional(pool)
            .await
    }
}
