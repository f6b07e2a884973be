//! Async report execution for the HTTP boundary.
//!
//! Runs the report engine on a background task, emitting progress logs to
//! the job registry so clients can poll or stream them.

use std::sync::Arc;

use crate::db::repository::StatusRepository;
use crate::report::{compute_report, ReportOptions};
use crate::services::job_tracker::{JobTracker, LogLevel};

/// Execute one report run and settle its registry entry.
///
/// Designed to be spawned as a background task: every outcome is recorded
/// on the tracker, so callers can ignore the returned result.
pub async fn run_report_async(
    report_id: String,
    tracker: JobTracker,
    repo: Arc<dyn StatusRepository>,
    options: ReportOptions,
) -> Result<usize, String> {
    tracker.log(&report_id, LogLevel::Info, "Starting report run...");
    tracker.log(
        &report_id,
        LogLevel::Info,
        "Interpolating uptime/downtime over the trailing hour/day/week windows...",
    );

    match compute_report(repo.as_ref(), &options).await {
        Ok(rows) => {
            let store_count = rows.len();
            tracker.log(
                &report_id,
                LogLevel::Success,
                format!("Computed uptime/downtime for {} stores", store_count),
            );
            tracker.complete_job(&report_id, rows);
            Ok(store_count)
        }
        Err(e) => {
            let msg = format!("Report run failed: {}", e);
            log::error!("report {}: {}", report_id, msg);
            tracker.fail_job(&report_id, &msg);
            Err(msg)
        }
    }
}
