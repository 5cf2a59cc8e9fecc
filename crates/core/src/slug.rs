//! Slug format rules and numbered-variant helpers.
//!
//! A slug is a lowercase, hyphen-delimited identifier (`the-hero-returns`).
//! When a slug is already taken within its scope, a numbered variant
//! `base-N` is assigned instead, where `N` is a positive decimal integer
//! without a leading zero.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a slug in bytes, numbered suffix included.
///
/// Checked on requested slugs and again on every resolved `base-N` variant,
/// so a base close to the limit cannot take a numbered variant.
pub const MAX_SLUG_LENGTH: usize = 128;

/// Regex pattern a valid slug must match.
pub const SLUG_PATTERN: &str = r"^[a-z0-9]+(?:-[a-z0-9]+)*$";

static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(SLUG_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that `slug` is non-empty, lowercase and hyphen-delimited.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("slug must not be empty".to_string()));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "slug exceeds maximum length of {MAX_SLUG_LENGTH} characters (got {})",
            slug.len()
        )));
    }
    if !SLUG_RE.is_match(slug) {
        return Err(CoreError::Validation(format!(
            "slug '{slug}' must contain only lowercase letters, digits and single hyphens"
        )));
    }
    Ok(())
}

/// Derive a slug from free text.
///
/// Lowercases ASCII letters, keeps digits, and collapses every other run of
/// characters into a single hyphen. Leading and trailing hyphens are
/// dropped, and the result is truncated to [`MAX_SLUG_LENGTH`].
///
/// Returns an empty string when `text` has no ASCII alphanumerics.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    if slug.len() > MAX_SLUG_LENGTH {
        slug.truncate(MAX_SLUG_LENGTH);
        while slug.ends_with('-') {
            slug.pop();
        }
    }
    slug
}

// ---------------------------------------------------------------------------
// Numbered variants
// ---------------------------------------------------------------------------

/// Build the numbered variant `base-iteration`.
pub fn numbered_variant(base: &str, iteration: u32) -> String {
    format!("{base}-{iteration}")
}

/// Anchored regex matching every numbered variant of `base`.
///
/// The numeric suffix is the first capture group. The pattern is valid both
/// for the `regex` crate and for PostgreSQL's `~` operator.
pub fn variant_pattern(base: &str) -> String {
    format!("^{}-([0-9]+)$", regex::escape(base))
}

/// Parse the iteration number of a stored variant `base-N`.
///
/// `slug` is expected to already match [`variant_pattern`]; a suffix that
/// does not parse as a `u32` yields [`CoreError::InvalidSlugSuffix`].
pub fn parse_iteration(base: &str, slug: &str) -> Result<u32, CoreError> {
    let suffix = slug
        .strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('-'))
        .unwrap_or(slug);

    suffix
        .parse::<u32>()
        .map_err(|source| CoreError::InvalidSlugSuffix {
            slug: slug.to_string(),
            source,
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -- validate_slug -------------------------------------------------------

    #[test]
    fn accepts_hyphenated_lowercase() {
        assert!(validate_slug("save-the-cat").is_ok());
        assert!(validate_slug("act-3").is_ok());
        assert!(validate_slug("a").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert_matches!(validate_slug(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_uppercase_and_spaces() {
        assert_matches!(validate_slug("Save-The-Cat"), Err(CoreError::Validation(_)));
        assert_matches!(validate_slug("save the cat"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_doubled_and_dangling_hyphens() {
        assert_matches!(validate_slug("save--cat"), Err(CoreError::Validation(_)));
        assert_matches!(validate_slug("-save"), Err(CoreError::Validation(_)));
        assert_matches!(validate_slug("save-"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_overlong() {
        let slug = "a".repeat(MAX_SLUG_LENGTH + 1);
        assert_matches!(validate_slug(&slug), Err(CoreError::Validation(_)));
    }

    // -- slugify -------------------------------------------------------------

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  The Hero's   Journey! "), "the-hero-s-journey");
    }

    #[test]
    fn slugify_keeps_digits() {
        assert_eq!(slugify("Act 3: Finale"), "act-3-finale");
    }

    #[test]
    fn slugify_without_alphanumerics_is_empty() {
        assert_eq!(slugify("!!! ---"), "");
    }

    #[test]
    fn slugify_output_is_valid() {
        let slug = slugify("Save the Cat (15 beats)");
        assert!(validate_slug(&slug).is_ok());
    }

    #[test]
    fn slugify_truncates_without_trailing_hyphen() {
        let text = format!("{} b", "a".repeat(MAX_SLUG_LENGTH - 1));
        let slug = slugify(&text);
        assert!(slug.len() <= MAX_SLUG_LENGTH);
        assert!(!slug.ends_with('-'));
    }

    // -- numbered variants ---------------------------------------------------

    #[test]
    fn builds_variant() {
        assert_eq!(numbered_variant("hero", 3), "hero-3");
    }

    #[test]
    fn pattern_matches_only_numbered_variants_of_base() {
        let re = Regex::new(&variant_pattern("hero")).unwrap();
        assert!(re.is_match("hero-1"));
        assert!(re.is_match("hero-42"));
        assert!(!re.is_match("hero"));
        assert!(!re.is_match("hero-one"));
        assert!(!re.is_match("hero-1-2"));
        assert!(!re.is_match("superhero-1"));
    }

    #[test]
    fn pattern_does_not_match_variants_of_longer_base() {
        let re = Regex::new(&variant_pattern("hero")).unwrap();
        assert!(!re.is_match("hero-quest-1"));
    }

    #[test]
    fn parses_iteration() {
        assert_eq!(parse_iteration("hero", "hero-7").unwrap(), 7);
        assert_eq!(parse_iteration("act-1", "act-1-12").unwrap(), 12);
    }

    #[test]
    fn unparseable_suffix_is_error() {
        assert_matches!(
            parse_iteration("hero", "hero-99999999999"),
            Err(CoreError::InvalidSlugSuffix { .. })
        );
        assert_matches!(
            parse_iteration("hero", "hero-x"),
            Err(CoreError::InvalidSlugSuffix { .. })
        );
    }
}
