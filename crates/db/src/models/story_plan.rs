//! Story plan entity model and DTOs.

use beatsmith_core::entity_creator::SlugCandidate;
use beatsmith_core::slug_resolver::SlugScope;
use beatsmith_core::story_plan::BeatDefinition;
use beatsmith_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A story plan row from the `story_plans` table.
///
/// Rows are never updated; several rows can share a slug and the most
/// recently created one is the current plan.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoryPlan {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    /// Canonical beat order. NOT NULL JSONB array.
    pub beats: Json<Vec<BeatDefinition>>,
    pub created_at: Timestamp,
}

/// DTO for creating a story plan. `slug` is globally unique.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStoryPlan {
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub beats: Vec<BeatDefinition>,
}

impl SlugCandidate for CreateStoryPlan {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn set_slug(&mut self, slug: String) {
        self.slug = slug;
    }

    fn scope(&self) -> SlugScope {
        SlugScope::Global
    }
}

/// DTO for a new iteration of an existing story plan. The slug comes from
/// the plan being iterated, never from the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStoryPlan {
    pub name: String,
    pub description: Option<String>,
    pub beats: Vec<BeatDefinition>,
}
