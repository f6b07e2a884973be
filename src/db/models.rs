//! Shared data models re-exported for database layer consumers.

pub use crate::api::{ReportRow, StoreId, StoreStatus};
pub use crate::models::observation::{
    BusinessHoursRow, LookbackMode, ObservationRow, TimezoneRow,
};
