//! Data Transfer Objects for the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::api::{ReportRow, StoreId};
use crate::models::observation::LookbackMode;
use crate::services::job_tracker::{JobStatus, LogEntry};

/// Request body for triggering a report run. All fields are optional; an
/// empty body (`{}`) triggers a wall-clock run over the trailing week.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerReportRequest {
    /// Direction of the historical observation query.
    #[serde(default)]
    pub lookback: LookbackMode,
    /// Reference instant override, mainly for reproducible runs.
    #[serde(default)]
    pub now_utc: Option<DateTime<Utc>>,
}

/// Response for a report trigger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerReportResponse {
    /// Report id for tracking the async run
    pub report_id: String,
    /// Message about the operation
    pub message: String,
}

/// Report status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportStatusResponse {
    /// Report id
    pub report_id: String,
    /// Job status
    pub status: JobStatus,
    /// Log entries
    pub logs: Vec<LogEntry>,
    /// Report rows, present once the run completes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<ReportRow>>,
}

/// Store list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreListResponse {
    /// Distinct store ids in the observation source
    pub stores: Vec<StoreId>,
    /// Total count
    pub total: usize,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub database: String,
}
