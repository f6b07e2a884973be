//! High-level repository service functions.
//!
//! Thin orchestration over the repository trait, shared by the HTTP
//! handlers and tests. These work with any `StatusRepository`
//! implementation.

use crate::api::StoreId;
use crate::db::repository::{RepositoryResult, StatusRepository};

/// Check repository connectivity.
pub async fn health_check(repo: &dyn StatusRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Distinct store ids known to the observation source, in source order.
pub async fn list_store_ids(repo: &dyn StatusRepository) -> RepositoryResult<Vec<StoreId>> {
    repo.fetch_store_ids().await
}
