//! Public API surface for the store monitoring backend.
//!
//! This file consolidates the identifier newtypes and the report row DTO
//! shared by the engine, the repository layer, and the HTTP API. All types
//! derive Serialize/Deserialize for JSON serialization.

pub use crate::models::observation::StoreStatus;

use serde::{Deserialize, Serialize};

/// Store identifier (join key across all collaborator queries).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct StoreId(pub i64);

impl StoreId {
    pub fn new(value: i64) -> Self {
        StoreId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for StoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<StoreId> for i64 {
    fn from(id: StoreId) -> Self {
        id.0
    }
}

impl From<i64> for StoreId {
    fn from(value: i64) -> Self {
        StoreId(value)
    }
}

/// One row of the uptime/downtime report.
///
/// Unit contract carried over from the historical export: the `*_last_hour`
/// fields are whole minutes while `*_last_day` and `*_last_week` are whole
/// hours. See [`crate::report::windows::UnitPolicy`] for where the
/// conversion happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub store_id: StoreId,
    pub uptime_last_hour: i64,
    pub uptime_last_day: i64,
    pub uptime_last_week: i64,
    pub downtime_last_hour: i64,
    pub downtime_last_day: i64,
    pub downtime_last_week: i64,
}

impl ReportRow {
    /// Row for a store with no attributable observations.
    pub fn zeroed(store_id: StoreId) -> Self {
        Self {
            store_id,
            uptime_last_hour: 0,
            uptime_last_day: 0,
            uptime_last_week: 0,
            downtime_last_hour: 0,
            downtime_last_day: 0,
            downtime_last_week: 0,
        }
    }
}
