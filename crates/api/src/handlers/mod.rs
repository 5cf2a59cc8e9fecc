//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input, delegate to `beatsmith_core` for domain rules
//! and to `beatsmith_db` for persistence, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod beats_sheet;
pub mod logline;
pub mod story_plan;

use beatsmith_core::error::CoreError;
use beatsmith_core::slug::{slugify, validate_slug};
use validator::Validate;

/// Run the `validator` rules on a request body.
pub(crate) fn validate_body<T: Validate>(body: &T) -> Result<(), CoreError> {
    body.validate()
        .map_err(|e| CoreError::Validation(e.to_string()))
}

/// The slug a create request asks for: the explicit `slug` if given,
/// otherwise one derived from `name`.
pub(crate) fn requested_slug(slug: Option<String>, name: &str) -> Result<String, CoreError> {
    let slug = match slug {
        Some(slug) => slug,
        None => {
            let derived = slugify(name);
            if derived.is_empty() {
                return Err(CoreError::Validation(
                    "slug is required when name has no letters or digits".to_string(),
                ));
            }
            derived
        }
    };
    validate_slug(&slug)?;
    Ok(slug)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn explicit_slug_wins() {
        assert_eq!(
            requested_slug(Some("heist".into()), "The Heist").unwrap(),
            "heist"
        );
    }

    #[test]
    fn slug_derived_from_name() {
        assert_eq!(requested_slug(None, "The Heist!").unwrap(), "the-heist");
    }

    #[test]
    fn invalid_explicit_slug_is_rejected() {
        assert_matches!(
            requested_slug(Some("The Heist".into()), "x"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn underivable_slug_is_rejected() {
        assert_matches!(requested_slug(None, "???"), Err(CoreError::Validation(_)));
    }
}
