//! Row models and create DTOs.

pub mod beats_sheet;
pub mod logline;
pub mod story_plan;
