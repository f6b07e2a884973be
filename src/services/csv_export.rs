//! CSV materialization of a finished report.

use std::fmt::Write;

use crate::api::ReportRow;

/// Column order of the historical export.
pub const CSV_HEADER: &str = "store_id,uptime_last_hour,uptime_last_day,uptime_last_week,downtime_last_hour,downtime_last_day,downtime_last_week";

/// Render report rows as a CSV document: header plus one line per store.
pub fn report_to_csv(rows: &[ReportRow]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + rows.len() * 48);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for row in rows {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{}",
            row.store_id,
            row.uptime_last_hour,
            row.uptime_last_day,
            row.uptime_last_week,
            row.downtime_last_hour,
            row.downtime_last_day,
            row.downtime_last_week,
        );
    }
    out
}
