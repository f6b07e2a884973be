//! Database module for the status observation data set.
//!
//! This module provides abstractions for data access via the Repository
//! pattern, allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, report runner)            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Report Engine (report/) - consumes the trait read-only │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │  LocalRepository (in-memory) │  MysqlRepository (Diesel)
//!     └──────────────────────────────┘
//! ```
//!
//! The engine holds no connection or cursor of its own: it receives a
//! `StatusRepository` capability per run, so the core is testable against
//! the in-memory implementation with no process-wide state.

// Feature flag priority: mysql > local
// When multiple features are enabled (e.g., --all-features), mysql takes precedence.
#[cfg(not(any(feature = "mysql-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod models;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

// ==================== Service Layer ====================

pub use services::{health_check, list_store_ids};

// ==================== Repository Pattern Exports ====================

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "mysql-repo")]
pub use repositories::{MysqlConfig, MysqlRepository, PoolStats};
pub use repository::{
    ErrorContext, RepositoryError, RepositoryResult, StatusRepository,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn StatusRepository>> = OnceLock::new();

// Priority: mysql > local (when --all-features is used). Pool construction
// is synchronous, so initialization works from sync and async contexts
// alike.
#[cfg(feature = "mysql-repo")]
fn create_selected_repository() -> RepositoryResult<Arc<dyn StatusRepository>> {
    let config = MysqlConfig::from_env().map_err(RepositoryError::configuration)?;
    let repo = MysqlRepository::new(config)?;
    Ok(Arc::new(repo) as Arc<dyn StatusRepository>)
}

#[cfg(all(feature = "local-repo", not(feature = "mysql-repo")))]
fn create_selected_repository() -> RepositoryResult<Arc<dyn StatusRepository>> {
    Ok(RepositoryFactory::create_local())
}

/// Initialize the global repository singleton for the selected backend.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo =
        create_selected_repository().map_err(|e| anyhow::Error::msg(e.to_string()))?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn StatusRepository>> {
    if REPOSITORY.get().is_none() {
        let _ = init_repository();
    }

    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
