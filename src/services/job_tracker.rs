//! Report job tracking.
//!
//! An explicit in-memory registry of report runs, keyed by report id. Each
//! trigger mints a fresh id and one registry entry, so there is at most one
//! computation per id; distinct ids run concurrently without interference.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::ReportRow;

/// A single log entry with timestamp and message.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Report job status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Running,
    Complete,
    Failed,
}

/// Job metadata, logs, and (when complete) the report rows.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Job {
    pub report_id: String,
    pub status: JobStatus,
    pub logs: Vec<LogEntry>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    /// The finished report, present once the run completes.
    pub result: Option<Vec<ReportRow>>,
}

/// In-memory report job registry.
#[derive(Clone)]
pub struct JobTracker {
    jobs: Arc<RwLock<HashMap<String, Job>>>,
}

impl JobTracker {
    /// Create a new job tracker.
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a new running job and return its report id.
    pub fn create_job(&self) -> String {
        let report_id = Uuid::new_v4().to_string();
        let job = Job {
            report_id: report_id.clone(),
            status: JobStatus::Running,
            logs: vec![],
            created_at: chrono::Utc::now(),
            completed_at: None,
            result: None,
        };
        self.jobs.write().insert(report_id.clone(), job);
        report_id
    }

    /// Add a log entry to a job.
    pub fn log(&self, report_id: &str, level: LogLevel, message: impl Into<String>) {
        let mut jobs = self.jobs.write();
        if let Some(job) = jobs.get_mut(report_id) {
            job.logs.push(LogEntry {
                timestamp: chrono::Utc::now(),
                level,
                message: message.into(),
            });
        }
    }

    /// Mark a job as complete with the finished report.
    pub fn complete_job(&self, report_id: &str, rows: Vec<ReportRow>) {
        let mut jobs = self.jobs.write();
        if let Some(job) = jobs.get_mut(report_id) {
            job.status = JobStatus::Complete;
            job.completed_at = Some(chrono::Utc::now());
            job.result = Some(rows);
        }
    }

    /// Mark a job as failed.
    pub fn fail_job(&self, report_id: &str, error_message: impl Into<String>) {
        let mut jobs = self.jobs.write();
        if let Some(job) = jobs.get_mut(report_id) {
            job.status = JobStatus::Failed;
            job.completed_at = Some(chrono::Utc::now());
            job.logs.push(LogEntry {
                timestamp: chrono::Utc::now(),
                level: LogLevel::Error,
                message: error_message.into(),
            });
        }
    }

    /// Get a job by report id.
    pub fn get_job(&self, report_id: &str) -> Option<Job> {
        self.jobs.read().get(report_id).cloned()
    }

    /// Get all logs for a job.
    pub fn get_logs(&self, report_id: &str) -> Vec<LogEntry> {
        self.jobs
            .read()
            .get(report_id)
            .map(|job| job.logs.clone())
            .unwrap_or_default()
    }
}

impl Default for JobTracker {
    fn default() -> Self {
        Self::new()
    }
}
