//! Domain rows for the status observation data set.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::api::StoreId;

/// Point-in-time store status as recorded by the poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    Active,
    Inactive,
}

impl StoreStatus {
    /// Parse a stored status label.
    ///
    /// Only the literal `"active"` counts as uptime; any other label is
    /// treated as inactive, matching how the historical report credited
    /// time.
    pub fn from_label(label: &str) -> Self {
        if label == "active" {
            StoreStatus::Active
        } else {
            StoreStatus::Inactive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreStatus::Active => "active",
            StoreStatus::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single status poll as returned by the observation source.
///
/// The timestamp stays the raw stored string: the report engine owns the
/// parse and its failure mode, so the repository layer never interprets it
/// beyond ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationRow {
    pub store_id: StoreId,
    pub timestamp_utc: String,
    pub status: StoreStatus,
}

/// Timezone assignment for a store (at most one per store).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneRow {
    pub store_id: StoreId,
    pub timezone_name: String,
}

/// Business-hours rule for one (store, weekday) pair.
///
/// `day_of_week` uses Monday=0..Sunday=6. A missing rule for a day means
/// the store is open around the clock on that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHoursRow {
    pub day_of_week: u8,
    pub start_time_local: NaiveTime,
    pub end_time_local: NaiveTime,
}

/// Direction of the historical observation query relative to the week-ago
/// boundary.
///
/// The historical report pulled rows *older than* the boundary, which
/// starves the hour and day buckets of recent data; `WithinLastWeek` is the
/// trailing-week slice that feeds them. The direction is injected into the
/// data-access call so choosing either never touches the interpolation
/// core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookbackMode {
    /// Observations at or after the week-ago boundary.
    #[default]
    WithinLastWeek,
    /// Observations at or before the week-ago boundary (the literal
    /// historical query direction).
    OlderThanLastWeek,
}
