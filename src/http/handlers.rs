//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer and report engine for business logic.

use axum::{
    extract::{Path, State},
    http::header,
    response::sse::{Event, Sse},
    response::IntoResponse,
    Json,
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;

use super::dto::{
    HealthResponse, ReportStatusResponse, StoreListResponse, TriggerReportRequest,
    TriggerReportResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::report::ReportOptions;
use crate::services::csv_export::report_to_csv;
use crate::services::job_tracker::JobStatus;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the
/// repository is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Stores
// =============================================================================

/// GET /v1/stores
///
/// List the distinct store ids present in the observation source.
pub async fn list_stores(State(state): State<AppState>) -> HandlerResult<StoreListResponse> {
    let stores = db_services::list_store_ids(state.repository.as_ref()).await?;
    let total = stores.len();

    Ok(Json(StoreListResponse { stores, total }))
}

// =============================================================================
// Report Jobs
// =============================================================================

/// POST /v1/reports
///
/// Trigger a report run. Returns a report id immediately; the engine runs
/// on a background task. An empty JSON body (`{}`) triggers a wall-clock
/// run over the trailing week.
pub async fn trigger_report(
    State(state): State<AppState>,
    Json(request): Json<TriggerReportRequest>,
) -> Result<(axum::http::StatusCode, Json<TriggerReportResponse>), AppError> {
    let report_id = state.job_tracker.create_job();
    let response_report_id = report_id.clone();

    let options = ReportOptions {
        now_utc: request.now_utc,
        lookback: request.lookback,
        ..Default::default()
    };

    // Spawn the run; its outcome is recorded on the job tracker.
    let tracker = state.job_tracker.clone();
    let repo = state.repository.clone();
    tokio::spawn(async move {
        let _ = crate::services::report_runner::run_report_async(report_id, tracker, repo, options)
            .await;
    });

    Ok((
        axum::http::StatusCode::ACCEPTED,
        Json(TriggerReportResponse {
            report_id: response_report_id.clone(),
            message: format!(
                "Report run started. Poll /v1/reports/{} for the result",
                response_report_id
            ),
        }),
    ))
}

/// GET /v1/reports/{report_id}
///
/// Get the current status, logs, and (once complete) rows of a report run.
pub async fn get_report_status(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> HandlerResult<ReportStatusResponse> {
    let job = state
        .job_tracker
        .get_job(&report_id)
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", report_id)))?;

    Ok(Json(ReportStatusResponse {
        report_id: job.report_id,
        status: job.status,
        logs: job.logs,
        rows: job.result,
    }))
}

/// GET /v1/reports/{report_id}/csv
///
/// Download a finished report as a CSV attachment.
pub async fn download_report_csv(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let job = state
        .job_tracker
        .get_job(&report_id)
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", report_id)))?;

    match job.status {
        JobStatus::Running => Err(AppError::Conflict(format!(
            "Report {} is still running",
            report_id
        ))),
        JobStatus::Failed => Err(AppError::Internal(format!(
            "Report {} failed; see /v1/reports/{}",
            report_id, report_id
        ))),
        JobStatus::Complete => {
            let rows = job.result.unwrap_or_default();
            let body = report_to_csv(&rows);
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}.csv\"", report_id),
                    ),
                ],
                body,
            ))
        }
    }
}

/// GET /v1/reports/{report_id}/logs
///
/// Stream report job logs via Server-Sent Events (SSE).
pub async fn stream_report_logs(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    // Verify the report exists before opening the stream
    if state.job_tracker.get_job(&report_id).is_none() {
        return Err(AppError::NotFound(format!("Report {} not found", report_id)));
    }

    let tracker = state.job_tracker.clone();
    let stream = async_stream::stream! {
        let mut last_log_count = 0;
        loop {
            let logs = tracker.get_logs(&report_id);

            // Send new logs since last check
            for log in logs.iter().skip(last_log_count) {
                let event_data = serde_json::to_string(log).unwrap_or_default();
                yield Ok(Event::default().data(event_data));
            }
            last_log_count = logs.len();

            // Terminal status closes the stream with a final event
            if let Some(job) = tracker.get_job(&report_id) {
                if job.status != JobStatus::Running {
                    let final_event = serde_json::json!({
                        "status": job.status,
                        "row_count": job.result.as_ref().map(|rows| rows.len()),
                    });
                    yield Ok(Event::default()
                        .event("complete")
                        .data(serde_json::to_string(&final_event).unwrap_or_default()));
                    break;
                }
            } else {
                break;
            }

            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    };

    Ok(Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(1))
            .text("keep-alive"),
    ))
}
