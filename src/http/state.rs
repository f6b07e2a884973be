//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::StatusRepository;
use crate::services::job_tracker::JobTracker;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for data access
    pub repository: Arc<dyn StatusRepository>,
    /// Registry of report jobs
    pub job_tracker: JobTracker,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn StatusRepository>) -> Self {
        Self {
            repository,
            job_tracker: JobTracker::new(),
        }
    }
}
