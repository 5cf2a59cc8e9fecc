//! Story plan templates and beats-sheet conformance checks.
//!
//! A story plan is an ordered list of [`BeatDefinition`]s. A beats sheet's
//! content is a list of [`Beat`]s that must follow the plan position by
//! position: same count, same keys, same order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum number of beat definitions in a single story plan.
pub const MAX_BEAT_DEFINITIONS: usize = 100;

/// Maximum length for a beat key in bytes, surrounding whitespace excluded.
pub const MAX_BEAT_KEY_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One template entry of a story plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeatDefinition {
    /// Stable identity of the beat, unique within its plan.
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub purpose: String,
    /// Lower bound on scenes for this beat. `None` means unconstrained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_scenes: Option<u32>,
    /// Upper bound on scenes for this beat. `None` means unconstrained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_scenes: Option<u32>,
}

/// A written beat of a beats sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beat {
    /// Key of the [`BeatDefinition`] this beat instantiates.
    pub key: String,
    pub title: String,
    pub content: String,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check that `content` follows `definitions` position by position.
///
/// Fails with [`CoreError::InvalidStoryPlan`] if the lengths differ or any
/// `content[i].key != definitions[i].key`. Scene-count bounds describe the
/// prose inside a beat and are not checked here.
pub fn check_story_plan(content: &[Beat], definitions: &[BeatDefinition]) -> Result<(), CoreError> {
    if content.len() != definitions.len() {
        return Err(CoreError::InvalidStoryPlan(format!(
            "expected {} beats, got {}",
            definitions.len(),
            content.len()
        )));
    }

    if let Some((index, (beat, definition))) = content
        .iter()
        .zip(definitions)
        .enumerate()
        .find(|(_, (beat, definition))| beat.key != definition.key)
    {
        return Err(CoreError::InvalidStoryPlan(format!(
            "beat {index} has key '{}', expected '{}'",
            beat.key, definition.key
        )));
    }

    Ok(())
}

/// Validate a story plan's definitions before it is stored.
///
/// Requires at least one definition, no more than
/// [`MAX_BEAT_DEFINITIONS`], non-empty unique keys, and
/// `min_scenes <= max_scenes` wherever both bounds are set.
pub fn validate_beat_definitions(definitions: &[BeatDefinition]) -> Result<(), CoreError> {
    if definitions.is_empty() {
        return Err(CoreError::Validation(
            "story plan must define at least one beat".to_string(),
        ));
    }
    if definitions.len() > MAX_BEAT_DEFINITIONS {
        return Err(CoreError::Validation(format!(
            "story plan defines {} beats, maximum is {MAX_BEAT_DEFINITIONS}",
            definitions.len()
        )));
    }

    let mut seen = HashSet::with_capacity(definitions.len());
    for (index, definition) in definitions.iter().enumerate() {
        let key = definition.key.trim();
        if key.is_empty() {
            return Err(CoreError::Validation(format!(
                "beat definition {index} has an empty key"
            )));
        }
        if key.len() > MAX_BEAT_KEY_LENGTH {
            return Err(CoreError::Validation(format!(
                "beat definition {index} key exceeds {MAX_BEAT_KEY_LENGTH} bytes"
            )));
        }
        if !seen.insert(key) {
            return Err(CoreError::Validation(format!(
                "beat key '{key}' is defined more than once"
            )));
        }
        if let (Some(min), Some(max)) = (definition.min_scenes, definition.max_scenes) {
            if min > max {
                return Err(CoreError::Validation(format!(
                    "beat '{}' has min_scenes {min} greater than max_scenes {max}",
                    definition.key
                )));
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
