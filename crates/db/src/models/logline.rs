//! Logline entity model and DTOs.

use beatsmith_core::entity_creator::SlugCandidate;
use beatsmith_core::slug_resolver::SlugScope;
use beatsmith_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A logline row from the `loglines` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Logline {
    pub id: DbId,
    pub user_id: DbId,
    pub slug: String,
    pub name: String,
    pub content: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new logline. `slug` is unique per `user_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLogline {
    pub user_id: DbId,
    pub slug: String,
    pub name: String,
    pub content: String,
}

impl SlugCandidate for CreateLogline {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn set_slug(&mut self, slug: String) {
        self.slug = slug;
    }

    fn scope(&self) -> SlugScope {
        SlugScope::User(self.user_id)
    }
}
