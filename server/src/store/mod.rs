//! Persistence gateway for recipes.
//!
//! Lookups take the raw identifier from the request path and reject
//! malformed ones before touching storage, so callers can tell a bad
//! request apart from a missing record.

mod memory;
mod postgres;

pub use memory::MemoryRecipeStore;
pub use postgres::PgRecipeStore;

use async_trait::async_trait;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use recipebox_core::{MalformedId, Recipe, RecipeId, RecipePatch, ValidRecipe, ValidationErrors};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    MalformedId(#[from] MalformedId),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Database connection failed: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("Database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Persist a validated recipe; the store assigns id and timestamps.
    async fn insert(&self, recipe: ValidRecipe) -> Result<Recipe, StoreError>;

    /// All recipes, newest first.
    async fn find_all(&self) -> Result<Vec<Recipe>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError>;

    /// Merge `patch` into the stored record, re-validate the result and
    /// commit it with a fresh `updated_at`.
    async fn update_by_id(&self, id: &str, patch: RecipePatch)
        -> Result<Option<Recipe>, StoreError>;

    /// Hard delete, returning the removed record.
    async fn delete_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError>;
}

pub(crate) fn parse_id(raw: &str) -> Result<RecipeId, StoreError> {
    Ok(RecipeId::parse(raw)?)
}

/// Current time, bumped past `previous` so a mutation always moves the
/// timestamp forward even when the clock has not ticked.
///
/// Truncated to microseconds, the precision Postgres stores, so the value
/// read back is the value compared here.
pub(crate) fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now().trunc_subsecs(6);
    if now > previous {
        now
    } else {
        previous.trunc_subsecs(6) + Duration::microseconds(1)
    }
}

/// Re-validate a stored record after applying a patch.
pub(crate) fn merge(current: &Recipe, patch: &RecipePatch) -> Result<ValidRecipe, StoreError> {
    recipebox_core::validate(&patch.apply_to(current)).map_err(StoreError::Validation)
}
