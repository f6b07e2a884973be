//! Repository trait for the status observation data set.
//!
//! The report engine consumes three read-only queries per store plus the
//! distinct-store enumeration; this trait is the capability handed into
//! each run. Implementations must be `Send + Sync` to work with async
//! Rust.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::api::StoreId;
use crate::models::observation::{BusinessHoursRow, LookbackMode, ObservationRow};

/// Timestamp layout used to render the week boundary for the stored-string
/// comparison.
pub const BOUNDARY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Read-only access to observations, timezone assignments, and
/// business-hours schedules.
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Distinct store ids present in the observation set, in the source's
    /// enumeration order.
    async fn fetch_store_ids(&self) -> RepositoryResult<Vec<StoreId>>;

    /// Observations for a store relative to the week-ago boundary, ordered
    /// ascending by stored timestamp. `lookback` selects which side of the
    /// boundary the slice covers.
    ///
    /// The boundary comparison happens on the raw stored strings (the
    /// zero-padded layout sorts chronologically), exactly like the SQL
    /// backend's text comparison.
    async fn fetch_observations(
        &self,
        store_id: StoreId,
        week_boundary_utc: DateTime<Utc>,
        lookback: LookbackMode,
    ) -> RepositoryResult<Vec<ObservationRow>>;

    /// Stored timezone name for a store (zero or one row). The value is
    /// returned as stored; recognizing it is the resolver's job.
    async fn fetch_timezone(&self, store_id: StoreId) -> RepositoryResult<Option<String>>;

    /// Business-hours rule for a (store, weekday) pair, Monday=0
    /// (zero or one row).
    async fn fetch_business_hours(
        &self,
        store_id: StoreId,
        day_of_week: u8,
    ) -> RepositoryResult<Option<BusinessHoursRow>>;

    /// Verify the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
