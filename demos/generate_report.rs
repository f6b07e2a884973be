//! Example demonstrating a full report run over an in-memory repository.
//!
//! This example shows how to:
//! 1. Seed observations, a timezone, and a business-hours rule
//! 2. Run the interpolation engine with a pinned `now` reference
//! 3. Render the finished report as CSV
//!
//! To run this example:
//! ```bash
//! cargo run --example generate_report
//! ```

use chrono::NaiveTime;

use storemon_rust::api::{StoreId, StoreStatus};
use storemon_rust::db::repositories::LocalRepository;
use storemon_rust::models::observation::BusinessHoursRow;
use storemon_rust::models::time::parse_observation_timestamp;
use storemon_rust::report::{compute_report, ReportOptions};
use storemon_rust::services::csv_export::report_to_csv;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Store Uptime Report ===\n");

    // Step 1: Seed an in-memory observation source.
    println!("1. Seeding observations...");
    let repo = LocalRepository::new();

    // Store 1: Chicago by default (no timezone row), open around the clock.
    // Polls alternate over the last hour of the run.
    let store_one = StoreId::new(1);
    repo.insert_observation(store_one, "2023-01-25 14:00:00.000000 UTC", StoreStatus::Active);
    repo.insert_observation(store_one, "2023-01-25 14:30:00.000000 UTC", StoreStatus::Inactive);
    repo.insert_observation(store_one, "2023-01-25 15:00:00.000000 UTC", StoreStatus::Active);

    // Store 2: Denver, open 09:00-17:00 every weekday.
    let store_two = StoreId::new(2);
    repo.set_timezone(store_two, "America/Denver");
    for day in 0..5 {
        repo.set_business_hours(
            store_two,
            BusinessHoursRow {
                day_of_week: day,
                start_time_local: NaiveTime::from_hms_opt(9, 0, 0).ok_or("bad time")?,
                end_time_local: NaiveTime::from_hms_opt(17, 0, 0).ok_or("bad time")?,
            },
        );
    }
    // Polled the previous day at 10:00-11:00 Denver time, inside hours.
    repo.insert_observation(store_two, "2023-01-24 17:00:00.000000 UTC", StoreStatus::Active);
    repo.insert_observation(store_two, "2023-01-24 18:00:00.000000 UTC", StoreStatus::Active);
    println!("   {} observations recorded\n", repo.observation_count());

    // Step 2: Run the engine with a pinned reference instant.
    println!("2. Computing the report...");
    let options = ReportOptions {
        now_utc: Some(parse_observation_timestamp("2023-01-25 15:00:00.000000 UTC")?),
        ..Default::default()
    };
    let rows = compute_report(&repo, &options).await?;
    println!("   {} rows computed\n", rows.len());

    // Step 3: Render as CSV, the same shape the HTTP boundary serves.
    println!("3. Report (hour columns in minutes, day/week columns in hours):\n");
    print!("{}", report_to_csv(&rows));

    Ok(())
}
