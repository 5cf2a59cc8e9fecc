//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod beats_sheet_repo;
pub mod logline_repo;
pub mod story_plan_repo;

pub use beats_sheet_repo::BeatsSheetRepo;
pub use logline_repo::LoglineRepo;
pub use story_plan_repo::StoryPlanRepo;

use beatsmith_core::slug_resolver::IterationOrder;

/// `ORDER BY` clause ranking slug variant rows for the resolver.
///
/// `HighestSuffix` casts through NUMERIC so oversized suffixes still sort
/// instead of failing the query.
pub(crate) fn variant_order_clause(order: IterationOrder) -> &'static str {
    match order {
        IterationOrder::LatestCreated => "ORDER BY created_at DESC, id DESC",
        IterationOrder::HighestSuffix => {
            "ORDER BY substring(slug from '([0-9]+)$')::numeric DESC, id DESC"
        }
    }
}
