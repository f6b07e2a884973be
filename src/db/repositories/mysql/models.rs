//! Row structs mapped from the MySQL schema.

use chrono::NaiveTime;
use diesel::prelude::*;

use crate::api::{StoreId, StoreStatus};
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::observation::{BusinessHoursRow, ObservationRow};

/// Stored local-time layout in `business_hours`.
const LOCAL_TIME_FORMAT: &str = "%H:%M:%S";

/// `store_status` row as stored: the timestamp stays raw text and the
/// status stays a label until mapped.
#[derive(Debug, Queryable)]
pub struct StoreStatusRecord {
    pub store_id: i64,
    pub timestamp_utc: String,
    pub status: String,
}

impl From<StoreStatusRecord> for ObservationRow {
    fn from(record: StoreStatusRecord) -> Self {
        ObservationRow {
            store_id: StoreId::new(record.store_id),
            timestamp_utc: record.timestamp_utc,
            status: StoreStatus::from_label(&record.status),
        }
    }
}

/// `business_hours` row as stored (`%H:%M:%S` text times).
#[derive(Debug, Queryable)]
pub struct BusinessHoursRecord {
    pub day: i8,
    pub start_time_local: String,
    pub end_time_local: String,
}

impl BusinessHoursRecord {
    /// Parse the stored local times into a domain rule.
    ///
    /// A malformed stored time is a data-access validation error, which
    /// aborts the report run like any other repository failure.
    pub fn into_rule(self, store_id: StoreId) -> RepositoryResult<BusinessHoursRow> {
        let start_time_local = parse_local_time(&self.start_time_local, store_id)?;
        let end_time_local = parse_local_time(&self.end_time_local, store_id)?;
        Ok(BusinessHoursRow {
            day_of_week: self.day as u8,
            start_time_local,
            end_time_local,
        })
    }
}

fn parse_local_time(value: &str, store_id: StoreId) -> RepositoryResult<NaiveTime> {
    NaiveTime::parse_from_str(value, LOCAL_TIME_FORMAT).map_err(|e| {
        RepositoryError::validation_with_context(
            format!("invalid business-hours time {:?}: {}", value, e),
            ErrorContext::new("fetch_business_hours")
                .with_entity("business_hours")
                .with_entity_id(store_id),
        )
    })
}
