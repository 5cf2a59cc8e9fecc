//! Postgres-backed [`SlugStore`] implementations.
//!
//! These adapt the logline and story plan repositories to the collaborator
//! traits the slug creator works against, translating `sqlx` failures into
//! [`CoreError`] at this boundary.

use async_trait::async_trait;
use beatsmith_core::entity_creator::{EntityCreator, SlugRetryPolicy, SlugStore};
use beatsmith_core::error::CoreError;
use beatsmith_core::slug_resolver::{IterationOrder, SlugLookup, SlugScope};

use crate::models::logline::{CreateLogline, Logline};
use crate::models::story_plan::{CreateStoryPlan, StoryPlan};
use crate::repositories::{LoglineRepo, StoryPlanRepo};
use crate::{is_unique_violation, DbPool};

/// Creator for loglines (slugs unique per user).
pub type LoglineCreator<'a> = EntityCreator<'a, PgLoglineStore>;

/// Creator for story plans (slugs unique globally).
pub type StoryPlanCreator<'a> = EntityCreator<'a, PgStoryPlanStore>;

/// Map an insert failure: unique violations become `AlreadyExists`,
/// everything else is wrapped as a storage error.
fn insert_error(entity: &'static str, slug: &str, err: sqlx::Error) -> CoreError {
    if is_unique_violation(&err) {
        CoreError::AlreadyExists {
            entity,
            slug: slug.to_string(),
        }
    } else {
        CoreError::storage(format!("insert {entity} '{slug}'"), err)
    }
}

// ---------------------------------------------------------------------------
// Loglines
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgLoglineStore {
    pool: DbPool,
}

impl PgLoglineStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn creator(&self, policy: SlugRetryPolicy) -> LoglineCreator<'_> {
        EntityCreator::new(self, policy)
    }
}

#[async_trait]
impl SlugLookup for PgLoglineStore {
    async fn find_latest_variant(
        &self,
        base: &str,
        scope: SlugScope,
        order: IterationOrder,
    ) -> Result<Option<String>, CoreError> {
        let SlugScope::User(user_id) = scope else {
            return Err(CoreError::Internal(
                "logline slugs are scoped per user".to_string(),
            ));
        };
        LoglineRepo::find_latest_variant(&self.pool, user_id, base, order)
            .await
            .map_err(|e| CoreError::storage(format!("find latest logline variant of '{base}'"), e))
    }
}

#[async_trait]
impl SlugStore for PgLoglineStore {
    type Candidate = CreateLogline;
    type Entity = Logline;

    fn entity_name(&self) -> &'static str {
        "Logline"
    }

    async fn insert(&self, candidate: &CreateLogline) -> Result<Logline, CoreError> {
        LoglineRepo::create(&self.pool, candidate)
            .await
            .map_err(|e| insert_error("Logline", &candidate.slug, e))
    }
}

// ---------------------------------------------------------------------------
// Story plans
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct PgStoryPlanStore {
    pool: DbPool,
}

impl PgStoryPlanStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn creator(&self, policy: SlugRetryPolicy) -> StoryPlanCreator<'_> {
        EntityCreator::new(self, policy)
    }
}

#[async_trait]
impl SlugLookup for PgStoryPlanStore {
    async fn find_latest_variant(
        &self,
        base: &str,
        _scope: SlugScope,
        order: IterationOrder,
    ) -> Result<Option<String>, CoreError> {
        StoryPlanRepo::find_latest_variant(&self.pool, base, order)
            .await
            .map_err(|e| {
                CoreError::storage(format!("find latest story plan variant of '{base}'"), e)
            })
    }
}

#[async_trait]
impl SlugStore for PgStoryPlanStore {
    type Candidate = CreateStoryPlan;
    type Entity = StoryPlan;

    fn entity_name(&self) -> &'static str {
        "StoryPlan"
    }

    async fn insert(&self, candidate: &CreateStoryPlan) -> Result<StoryPlan, CoreError> {
        StoryPlanRepo::create(&self.pool, candidate)
            .await
            .map_err(|e| insert_error("StoryPlan", &candidate.slug, e))
    }
}
