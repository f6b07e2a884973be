//! Trailing-window bucketing and reporting units.
//!
//! All three windows anchor to the single `now` captured at run start,
//! localized per store. Accumulation always happens in minutes; the unit
//! policy converts at materialization time only, so changing a column's
//! reported unit is a policy edit rather than an engine change.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::interpolator::AttributedDuration;
use crate::api::{ReportRow, StoreId, StoreStatus};

/// Start boundaries of the three trailing windows, in store-local time.
#[derive(Debug, Clone, Copy)]
pub struct WindowBounds {
    pub hour_start: DateTime<Tz>,
    pub day_start: DateTime<Tz>,
    pub week_start: DateTime<Tz>,
}

impl WindowBounds {
    /// Boundaries trailing from a localized `now`.
    pub fn trailing_from(now_local: DateTime<Tz>) -> Self {
        Self {
            hour_start: now_local - Duration::hours(1),
            day_start: now_local - Duration::days(1),
            week_start: now_local - Duration::weeks(1),
        }
    }
}

/// Accumulated minutes per window for one status.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowMinutes {
    pub last_hour: f64,
    pub last_day: f64,
    pub last_week: f64,
}

/// Uptime/downtime accumulator for one store.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowTotals {
    pub uptime: WindowMinutes,
    pub downtime: WindowMinutes,
}

impl WindowTotals {
    /// Bucket one attributed span.
    ///
    /// Hour and day membership test the span's `recorded_at` (the later
    /// observation's timestamp) against the window start, inclusive. Every
    /// span counts toward the week total: the observation query is already
    /// restricted to the week boundary.
    pub fn accumulate(&mut self, duration: &AttributedDuration, bounds: &WindowBounds) {
        let minutes = match duration.status {
            StoreStatus::Active => &mut self.uptime,
            StoreStatus::Inactive => &mut self.downtime,
        };
        if duration.recorded_at >= bounds.hour_start {
            minutes.last_hour += duration.minutes;
        }
        if duration.recorded_at >= bounds.day_start {
            minutes.last_day += duration.minutes;
        }
        minutes.last_week += duration.minutes;
    }

    /// Materialize a report row under the given unit policy.
    pub fn into_report_row(self, store_id: StoreId, units: &UnitPolicy) -> ReportRow {
        ReportRow {
            store_id,
            uptime_last_hour: units.last_hour.convert(self.uptime.last_hour),
            uptime_last_day: units.last_day.convert(self.uptime.last_day),
            uptime_last_week: units.last_week.convert(self.uptime.last_week),
            downtime_last_hour: units.last_hour.convert(self.downtime.last_hour),
            downtime_last_day: units.last_day.convert(self.downtime.last_day),
            downtime_last_week: units.last_week.convert(self.downtime.last_week),
        }
    }
}

/// Reporting unit for one window column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowUnit {
    Minutes,
    Hours,
}

impl WindowUnit {
    /// Round accumulated minutes into this unit.
    pub fn convert(&self, minutes: f64) -> i64 {
        match self {
            WindowUnit::Minutes => minutes.round() as i64,
            WindowUnit::Hours => (minutes / 60.0).round() as i64,
        }
    }
}

/// Per-window reporting units.
///
/// The historical contract reports the hour window in minutes and the day
/// and week windows in hours. Asymmetric across the row, but preserved as
/// the export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPolicy {
    pub last_hour: WindowUnit,
    pub last_day: WindowUnit,
    pub last_week: WindowUnit,
}

impl Default for UnitPolicy {
    fn default() -> Self {
        Self {
            last_hour: WindowUnit::Minutes,
            last_day: WindowUnit::Hours,
            last_week: WindowUnit::Hours,
        }
    }
}

#[cfg(test)]
#[path = "windows_tests.rs"]
mod windows_tests;
