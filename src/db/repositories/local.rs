//! In-memory repository for unit testing and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::api::{StoreId, StoreStatus};
use crate::db::repository::{RepositoryResult, StatusRepository, BOUNDARY_FORMAT};
use crate::models::observation::{BusinessHoursRow, LookbackMode, ObservationRow};

#[derive(Default)]
struct LocalState {
    observations: Vec<ObservationRow>,
    timezones: HashMap<StoreId, String>,
    business_hours: HashMap<(StoreId, u8), BusinessHoursRow>,
}

/// In-memory implementation of [`StatusRepository`].
///
/// Mirrors the SQL backend's observable behavior, including the raw-string
/// comparison against the week boundary. Store ids enumerate in first-seen
/// order.
#[derive(Default)]
pub struct LocalRepository {
    state: RwLock<LocalState>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one status poll. `timestamp_utc` is stored verbatim; the
    /// engine parses it at report time.
    pub fn insert_observation(
        &self,
        store_id: StoreId,
        timestamp_utc: impl Into<String>,
        status: StoreStatus,
    ) {
        self.state.write().observations.push(ObservationRow {
            store_id,
            timestamp_utc: timestamp_utc.into(),
            status,
        });
    }

    /// Assign a store's timezone name, stored unvalidated.
    pub fn set_timezone(&self, store_id: StoreId, timezone_name: impl Into<String>) {
        self.state
            .write()
            .timezones
            .insert(store_id, timezone_name.into());
    }

    /// Set the business-hours rule for one weekday (Monday=0).
    pub fn set_business_hours(&self, store_id: StoreId, rule: BusinessHoursRow) {
        self.state
            .write()
            .business_hours
            .insert((store_id, rule.day_of_week), rule);
    }

    /// Number of recorded observations, across all stores.
    pub fn observation_count(&self) -> usize {
        self.state.read().observations.len()
    }
}

#[async_trait]
impl StatusRepository for LocalRepository {
    async fn fetch_store_ids(&self) -> RepositoryResult<Vec<StoreId>> {
        let state = self.state.read();
        let mut seen = Vec::new();
        for obs in &state.observations {
            if !seen.contains(&obs.store_id) {
                seen.push(obs.store_id);
            }
        }
        Ok(seen)
    }

    async fn fetch_observations(
        &self,
        store_id: StoreId,
        week_boundary_utc: DateTime<Utc>,
        lookback: LookbackMode,
    ) -> RepositoryResult<Vec<ObservationRow>> {
        let boundary = week_boundary_utc.format(BOUNDARY_FORMAT).to_string();
        let state = self.state.read();
        let mut rows: Vec<ObservationRow> = state
            .observations
            .iter()
            .filter(|obs| obs.store_id == store_id)
            .filter(|obs| match lookback {
                LookbackMode::WithinLastWeek => obs.timestamp_utc.as_str() >= boundary.as_str(),
                LookbackMode::OlderThanLastWeek => obs.timestamp_utc.as_str() <= boundary.as_str(),
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.timestamp_utc.cmp(&b.timestamp_utc));
        Ok(rows)
    }

    async fn fetch_timezone(&self, store_id: StoreId) -> RepositoryResult<Option<String>> {
        Ok(self.state.read().timezones.get(&store_id).cloned())
    }

    async fn fetch_business_hours(
        &self,
        store_id: StoreId,
        day_of_week: u8,
    ) -> RepositoryResult<Option<BusinessHoursRow>> {
        Ok(self
            .state
            .read()
            .business_hours
            .get(&(store_id, day_of_week))
            .copied())
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
