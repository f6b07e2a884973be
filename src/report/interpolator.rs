//! Segment interpolation between consecutive observations.
//!
//! Polls are sparse and irregular; the engine assumes the last known status
//! holds until the next observation. Each consecutive pair of observations
//! therefore yields one elapsed span, credited to the *earlier*
//! observation's status and tagged with the *later* observation's local
//! timestamp for window bucketing.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::api::StoreStatus;

/// A parsed, localized observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalObservation {
    pub timestamp_local: DateTime<Tz>,
    pub status: StoreStatus,
}

/// An elapsed span credited to uptime or downtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributedDuration {
    /// The earlier observation's status.
    pub status: StoreStatus,
    /// The later observation's local timestamp, used for bucketing.
    pub recorded_at: DateTime<Tz>,
    pub minutes: f64,
}

/// Walk consecutive observation pairs and attribute elapsed time.
///
/// `open` flags whether each observation's local timestamp falls inside
/// business hours; a pair is credited only when its *later* point is open,
/// so a span straddling a business-hours boundary is classified entirely
/// by its endpoint. The previous pointer advances on every observation
/// regardless, so each span is measured against the most recent raw
/// observation, not the most recent in-hours one.
///
/// Observations must already be sorted ascending; equal timestamps yield a
/// zero-length span. Fewer than two observations attribute nothing.
pub fn attribute_durations(
    observations: &[LocalObservation],
    open: &[bool],
) -> Vec<AttributedDuration> {
    debug_assert_eq!(observations.len(), open.len());

    let mut attributed = Vec::new();
    let mut prev: Option<LocalObservation> = None;
    for (obs, is_open) in observations.iter().zip(open) {
        if *is_open {
            if let Some(prev) = prev {
                let elapsed = obs.timestamp_local.signed_duration_since(prev.timestamp_local);
                attributed.push(AttributedDuration {
                    status: prev.status,
                    recorded_at: obs.timestamp_local,
                    minutes: elapsed.num_milliseconds() as f64 / 60_000.0,
                });
            }
        }
        prev = Some(*obs);
    }
    attributed
}

#[cfg(test)]
#[path = "interpolator_tests.rs"]
mod interpolator_tests;
