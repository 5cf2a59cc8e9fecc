//! Next-free numbered slug variant resolution.
//!
//! [`SlugIterationResolver`] asks a [`SlugLookup`] for the existing numbered
//! variant of a base slug within a scope and derives the next iteration
//! from it. It holds no state of its own; the store's uniqueness constraint
//! stays authoritative and the resolved slug is only a candidate.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use crate::error::CoreError;
use crate::slug::{numbered_variant, parse_iteration, validate_slug};
use crate::types::DbId;

/// The set of rows a slug must be unique within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugScope {
    /// Rows owned by one user (loglines).
    User(DbId),
    /// Every row of the entity kind (story plans).
    Global,
}

/// Which existing variant the resolver treats as the current maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IterationOrder {
    /// The most recently created variant. Correct as long as variants are
    /// created in increasing numeric order.
    #[default]
    LatestCreated,
    /// The variant with the largest numeric suffix, regardless of when it
    /// was created.
    HighestSuffix,
}

impl IterationOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            IterationOrder::LatestCreated => "latest_created",
            IterationOrder::HighestSuffix => "highest_suffix",
        }
    }
}

impl fmt::Display for IterationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IterationOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest_created" => Ok(IterationOrder::LatestCreated),
            "highest_suffix" => Ok(IterationOrder::HighestSuffix),
            other => Err(CoreError::Validation(format!(
                "unknown slug iteration order '{other}' (expected latest_created or highest_suffix)"
            ))),
        }
    }
}

/// Read side of a slug-scoped store.
#[async_trait]
pub trait SlugLookup: Send + Sync {
    /// Return the slug of the first row in `scope` whose slug matches
    /// `^{base}-[0-9]+$`, ranked by `order`, or `None` if no such row exists.
    async fn find_latest_variant(
        &self,
        base: &str,
        scope: SlugScope,
        order: IterationOrder,
    ) -> Result<Option<String>, CoreError>;
}

/// A resolved numbered variant and its iteration number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSlug {
    pub slug: String,
    pub iteration: u32,
}

/// Derives the next unused `base-N` slug from what a [`SlugLookup`] reports.
pub struct SlugIterationResolver<'a, L: ?Sized> {
    lookup: &'a L,
    order: IterationOrder,
}

impl<'a, L: SlugLookup + ?Sized> SlugIterationResolver<'a, L> {
    pub fn new(lookup: &'a L, order: IterationOrder) -> Self {
        Self { lookup, order }
    }

    /// Compute the next numbered variant of `base` within `scope`.
    ///
    /// With no existing variant the result is `base-1`; otherwise the
    /// existing suffix `k` yields `base-(k+1)`. Lookup failures and
    /// unparseable stored suffixes are propagated unchanged. A variant that
    /// would exceed [`MAX_SLUG_LENGTH`] fails with [`CoreError::Validation`].
    ///
    /// [`MAX_SLUG_LENGTH`]: crate::slug::MAX_SLUG_LENGTH
    pub async fn resolve(&self, base: &str, scope: SlugScope) -> Result<ResolvedSlug, CoreError> {
        let existing = self
            .lookup
            .find_latest_variant(base, scope, self.order)
            .await?;

        let iteration = match existing {
            None => 1,
            Some(slug) => parse_iteration(base, &slug)?.checked_add(1).ok_or_else(|| {
                CoreError::Internal(format!("slug iteration overflow for '{slug}'"))
            })?,
        };

        let slug = numbered_variant(base, iteration);
        validate_slug(&slug)?;

        Ok(ResolvedSlug { slug, iteration })
    }
}
