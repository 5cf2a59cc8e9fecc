//! Slug-conflict-aware entity creation.
//!
//! [`EntityCreator`] inserts a candidate under the slug the caller asked for.
//! When the store reports [`CoreError::AlreadyExists`], it resolves the next
//! numbered variant of the original slug and inserts again, up to
//! [`SlugRetryPolicy::max_retries`] times. A conflict on the last allowed
//! attempt is returned to the caller; nothing else is ever retried.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::slug_resolver::{IterationOrder, SlugIterationResolver, SlugLookup, SlugScope};

/// Default number of re-inserts after the first slug conflict.
pub const DEFAULT_SLUG_MAX_RETRIES: u32 = 1;

/// An insert candidate carrying a slug and the scope it must be unique in.
pub trait SlugCandidate: Send + Sync {
    fn slug(&self) -> &str;
    fn set_slug(&mut self, slug: String);
    fn scope(&self) -> SlugScope;
}

/// Write side of a slug-scoped store.
#[async_trait]
pub trait SlugStore: SlugLookup {
    type Candidate: SlugCandidate;
    type Entity: Send;

    /// Entity name used in log fields.
    fn entity_name(&self) -> &'static str;

    /// Persist `candidate`. A uniqueness violation on its slug must surface
    /// as [`CoreError::AlreadyExists`] so the creator can tell it apart from
    /// every other failure.
    async fn insert(&self, candidate: &Self::Candidate) -> Result<Self::Entity, CoreError>;
}

/// Bounded retry configuration for slug conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlugRetryPolicy {
    /// Re-inserts allowed after the first conflict. `0` disables resolution.
    pub max_retries: u32,
    /// Variant ranking passed to the resolver.
    pub order: IterationOrder,
}

impl Default for SlugRetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_SLUG_MAX_RETRIES,
            order: IterationOrder::default(),
        }
    }
}

/// A failed create, tagged with the step that failed.
///
/// [`CreateError::kind`] exposes the underlying [`CoreError`] so callers can
/// branch on it with `matches!` instead of inspecting messages.
#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error("insert with slug '{slug}' failed on attempt {attempt}")]
    Insert {
        slug: String,
        attempt: u32,
        #[source]
        source: CoreError,
    },

    #[error("resolving the next iteration of slug '{base}' failed")]
    Resolve {
        base: String,
        #[source]
        source: CoreError,
    },
}

impl CreateError {
    pub fn kind(&self) -> &CoreError {
        match self {
            CreateError::Insert { source, .. } | CreateError::Resolve { source, .. } => source,
        }
    }

    pub fn into_kind(self) -> CoreError {
        match self {
            CreateError::Insert { source, .. } | CreateError::Resolve { source, .. } => source,
        }
    }
}

/// Creates entities through a [`SlugStore`], resolving slug conflicts.
pub struct EntityCreator<'a, S: ?Sized> {
    store: &'a S,
    policy: SlugRetryPolicy,
}

impl<'a, S: SlugStore + ?Sized> EntityCreator<'a, S> {
    pub fn new(store: &'a S, policy: SlugRetryPolicy) -> Self {
        Self { store, policy }
    }

    /// Insert `candidate`, falling back to numbered variants of its slug.
    ///
    /// Every resolution is computed from the slug originally requested, so a
    /// retried candidate is `base-N`, never `base-N-M`.
    pub async fn create(&self, mut candidate: S::Candidate) -> Result<S::Entity, CreateError> {
        let base = candidate.slug().to_string();
        let scope = candidate.scope();
        let resolver = SlugIterationResolver::new(self.store, self.policy.order);
        let mut attempt: u32 = 1;

        loop {
            match self.store.insert(&candidate).await {
                Ok(entity) => {
                    if attempt > 1 {
                        tracing::info!(
                            entity = self.store.entity_name(),
                            requested = %base,
                            assigned = candidate.slug(),
                            attempt,
                            "Assigned numbered slug variant"
                        );
                    }
                    return Ok(entity);
                }
                Err(err) if err.is_already_exists() && attempt <= self.policy.max_retries => {
                    tracing::debug!(
                        entity = self.store.entity_name(),
                        slug = candidate.slug(),
                        attempt,
                        "Slug conflict, resolving next iteration"
                    );

                    let resolved = resolver.resolve(&base, scope).await.map_err(|source| {
                        CreateError::Resolve {
                            base: base.clone(),
                            source,
                        }
                    })?;
                    candidate.set_slug(resolved.slug);
                    attempt += 1;
                }
                Err(source) => {
                    if source.is_already_exists() {
                        tracing::warn!(
                            entity = self.store.entity_name(),
                            slug = candidate.slug(),
                            attempt,
                            "Slug conflict persisted after retries"
                        );
                    }
                    return Err(CreateError::Insert {
                        slug: candidate.slug().to_string(),
                        attempt,
                        source,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::slug::MAX_SLUG_LENGTH;
    use crate::testing::{MemoryStore, TestCandidate};

    const ALICE: SlugScope = SlugScope::User(1);

    fn creator(store: &MemoryStore) -> EntityCreator<'_, MemoryStore> {
        EntityCreator::new(store, SlugRetryPolicy::default())
    }

    #[tokio::test]
    async fn free_slug_is_kept_without_lookup() {
        let store = MemoryStore::with_rows(&[("villain", ALICE)]);

        let entity = creator(&store)
            .create(TestCandidate::new("hero", ALICE))
            .await
            .unwrap();

        assert_eq!(entity.slug, "hero");
        assert_eq!(store.insert_count(), 1);
        assert_eq!(store.lookup_count(), 0);
    }

    #[tokio::test]
    async fn conflict_retries_with_resolved_variant() {
        let store = MemoryStore::with_rows(&[("hero", ALICE), ("hero-1", ALICE)]);

        let entity = creator(&store)
            .create(TestCandidate::new("hero", ALICE))
            .await
            .unwrap();

        assert_eq!(entity.slug, "hero-2");
        assert_eq!(store.insert_count(), 2);
        assert_eq!(store.lookup_count(), 1);
    }

    #[tokio::test]
    async fn same_slug_in_other_scope_does_not_conflict() {
        let store = MemoryStore::with_rows(&[("hero", SlugScope::User(2))]);

        let entity = creator(&store)
            .create(TestCandidate::new("hero", ALICE))
            .await
            .unwrap();

        assert_eq!(entity.slug, "hero");
        assert_eq!(store.lookup_count(), 0);
    }

    #[tokio::test]
    async fn second_conflict_is_terminal() {
        // Another writer took `hero-2` after the lookup ran.
        let store =
            MemoryStore::with_rows(&[("hero", ALICE), ("hero-1", ALICE)]).with_hidden("hero-2");

        let err = creator(&store)
            .create(TestCandidate::new("hero", ALICE))
            .await
            .unwrap_err();

        assert_matches!(
            &err,
            CreateError::Insert { slug, attempt: 2, .. } if slug == "hero-2"
        );
        assert_matches!(err.kind(), CoreError::AlreadyExists { .. });
        assert_eq!(store.insert_count(), 2);
        assert_eq!(store.lookup_count(), 1);
    }

    #[tokio::test]
    async fn zero_retries_surfaces_first_conflict() {
        let store = MemoryStore::with_rows(&[("hero", ALICE)]);
        let policy = SlugRetryPolicy {
            max_retries: 0,
            ..SlugRetryPolicy::default()
        };

        let err = EntityCreator::new(&store, policy)
            .create(TestCandidate::new("hero", ALICE))
            .await
            .unwrap_err();

        assert_matches!(err.into_kind(), CoreError::AlreadyExists { slug, .. } if slug == "hero");
        assert_eq!(store.lookup_count(), 0);
    }

    #[tokio::test]
    async fn larger_bound_keeps_resolving_from_base() {
        let store = MemoryStore::with_rows(&[("hero", ALICE)]).with_hidden("hero-1");
        let policy = SlugRetryPolicy {
            max_retries: 3,
            ..SlugRetryPolicy::default()
        };

        let err = EntityCreator::new(&store, policy)
            .create(TestCandidate::new("hero", ALICE))
            .await
            .unwrap_err();

        // `hero-1` stays hidden from the lookup, so every retry resolves to it.
        assert_matches!(&err, CreateError::Insert { slug, attempt: 4, .. } if slug == "hero-1");
        assert_eq!(store.insert_count(), 4);
        assert_eq!(store.lookup_count(), 3);
    }

    #[tokio::test]
    async fn non_conflict_insert_failure_is_not_retried() {
        let store = MemoryStore::default().failing_insert();

        let err = creator(&store)
            .create(TestCandidate::new("hero", ALICE))
            .await
            .unwrap_err();

        assert_matches!(&err, CreateError::Insert { attempt: 1, .. });
        assert_matches!(err.kind(), CoreError::Storage { .. });
        assert_eq!(store.insert_count(), 1);
        assert_eq!(store.lookup_count(), 0);
    }

    #[tokio::test]
    async fn overlong_variant_is_never_inserted() {
        let base = "a".repeat(MAX_SLUG_LENGTH);
        let store = MemoryStore::with_rows(&[(base.as_str(), ALICE)]);

        let err = creator(&store)
            .create(TestCandidate::new(&base, ALICE))
            .await
            .unwrap_err();

        assert_matches!(&err, CreateError::Resolve { base: b, .. } if *b == base);
        assert_matches!(err.kind(), CoreError::Validation(_));
        assert_eq!(store.insert_count(), 1);
    }

    #[tokio::test]
    async fn resolver_failure_is_tagged_with_base() {
        let store = MemoryStore::with_rows(&[("hero", ALICE)]).failing_lookup();

        let err = creator(&store)
            .create(TestCandidate::new("hero", ALICE))
            .await
            .unwrap_err();

        assert_matches!(&err, CreateError::Resolve { base, .. } if base == "hero");
        assert_matches!(err.kind(), CoreError::Storage { .. });
        assert_eq!(store.insert_count(), 1);
    }
}
