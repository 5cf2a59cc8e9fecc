use crate::types::DbId;

/// Boxed source for infrastructure failures raised by persistence adapters.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Entity not found: {entity} with slug '{slug}'")]
    SlugNotFound { entity: &'static str, slug: String },

    #[error("{entity} with slug '{slug}' already exists")]
    AlreadyExists { entity: &'static str, slug: String },

    #[error("Invalid story plan: {0}")]
    InvalidStoryPlan(String),

    #[error("Stored slug '{slug}' has a non-numeric iteration suffix")]
    InvalidSlugSuffix {
        slug: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: BoxedSource,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Wrap an infrastructure failure with the operation that raised it.
    pub fn storage(context: impl Into<String>, source: impl Into<BoxedSource>) -> Self {
        CoreError::Storage {
            context: context.into(),
            source: source.into(),
        }
    }

    /// `true` for a uniqueness conflict on the candidate slug.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, CoreError::AlreadyExists { .. })
    }
}
