//! Timezone-aware windowed uptime/downtime interpolation engine.
//!
//! Control flow, per store: resolve the timezone, localize the run's `now`
//! reference, fetch the observation slice relative to the week boundary,
//! parse and localize each poll, gate each point on business hours,
//! attribute elapsed time between consecutive polls to the earlier poll's
//! status, and bucket the result into the trailing hour/day/week windows.
//!
//! Stores are processed strictly sequentially with no shared state between
//! them. The engine performs no writes and holds nothing across runs; its
//! only collaborator is the injected [`StatusRepository`] capability.

pub mod business_hours;
pub mod interpolator;
pub mod timezone;
pub mod windows;

use chrono::{DateTime, Utc};

use crate::api::{ReportRow, StoreId};
use crate::db::repository::{RepositoryError, StatusRepository};
use crate::models::observation::LookbackMode;
use crate::models::time::{self, TimestampParseError};

use business_hours::BusinessHoursCache;
use interpolator::{attribute_durations, LocalObservation};
use timezone::StoreTimezone;
use windows::{UnitPolicy, WindowBounds, WindowTotals};

/// Options for one report run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Reference instant for the trailing windows. Defaults to the wall
    /// clock at run start; captured once and shared by every store.
    pub now_utc: Option<DateTime<Utc>>,
    /// Direction of the historical observation query.
    pub lookback: LookbackMode,
    /// Reporting units per window column.
    pub units: UnitPolicy,
}

/// Errors that abort a report run.
///
/// There are no retries and no partial results: the first failure on any
/// store fails the run as a whole.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("store {store_id}: {source}")]
    Timestamp {
        store_id: StoreId,
        source: TimestampParseError,
    },
}

/// Compute the full uptime/downtime report.
///
/// Yields one row per distinct store id in the observation source, in the
/// source's enumeration order.
pub async fn compute_report(
    repo: &dyn StatusRepository,
    options: &ReportOptions,
) -> Result<Vec<ReportRow>, ReportError> {
    let now_utc = options.now_utc.unwrap_or_else(Utc::now);
    let store_ids = repo.fetch_store_ids().await?;
    log::debug!("computing uptime report for {} stores", store_ids.len());

    let mut rows = Vec::with_capacity(store_ids.len());
    for store_id in store_ids {
        rows.push(compute_store_row(repo, store_id, now_utc, options).await?);
    }
    Ok(rows)
}

/// Compute one store's report row.
async fn compute_store_row(
    repo: &dyn StatusRepository,
    store_id: StoreId,
    now_utc: DateTime<Utc>,
    options: &ReportOptions,
) -> Result<ReportRow, ReportError> {
    let zone = StoreTimezone::resolve(repo.fetch_timezone(store_id).await?.as_deref());
    let tz = zone.tz();
    let now_local = time::localize(now_utc, tz);
    let bounds = WindowBounds::trailing_from(now_local);

    let week_boundary_utc = bounds.week_start.with_timezone(&Utc);
    let raw = repo
        .fetch_observations(store_id, week_boundary_utc, options.lookback)
        .await?;

    // Parse and localize, then sort ascending before walking pairs. The
    // sort is stable, so equal timestamps keep their source order.
    let mut observations = Vec::with_capacity(raw.len());
    for row in &raw {
        let utc = time::parse_observation_timestamp(&row.timestamp_utc)
            .map_err(|source| ReportError::Timestamp { store_id, source })?;
        observations.push(LocalObservation {
            timestamp_local: time::localize(utc, tz),
            status: row.status,
        });
    }
    observations.sort_by_key(|obs| obs.timestamp_local);

    // Business-hours gate per point; a pair is classified by its endpoint.
    let mut cache = BusinessHoursCache::new(store_id);
    let mut open = Vec::with_capacity(observations.len());
    for obs in &observations {
        let day = time::weekday_monday0(&obs.timestamp_local);
        open.push(cache.is_open(repo, day, obs.timestamp_local.time()).await?);
    }

    let mut totals = WindowTotals::default();
    for duration in attribute_durations(&observations, &open) {
        totals.accumulate(&duration, &bounds);
    }
    Ok(totals.into_report_row(store_id, &options.units))
}
