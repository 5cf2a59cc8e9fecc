//! Beatsmith domain logic.
//!
//! Pure types and algorithms with no database or HTTP dependencies:
//!
//! - [`slug`]: slug format rules and numbered-variant helpers.
//! - [`slug_resolver`]: next free `base-N` variant within a scope.
//! - [`entity_creator`]: insert with bounded retry on slug conflicts.
//! - [`story_plan`]: beat templates and beats-sheet conformance checks.
//!
//! Persistence is reached only through the [`slug_resolver::SlugLookup`]
//! and [`entity_creator::SlugStore`] traits, implemented by `beatsmith-db`.

pub mod entity_creator;
pub mod error;
pub mod slug;
pub mod slug_resolver;
pub mod story_plan;
pub mod types;

#[cfg(test)]
mod testing;
