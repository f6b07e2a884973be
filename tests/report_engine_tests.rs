//! End-to-end report engine tests over the in-memory repository.

use chrono::{DateTime, NaiveTime, Utc};

use storemon_rust::api::{StoreId, StoreStatus};
use storemon_rust::db::repositories::LocalRepository;
use storemon_rust::models::observation::{BusinessHoursRow, LookbackMode};
use storemon_rust::models::time::parse_observation_timestamp;
use storemon_rust::report::{compute_report, ReportError, ReportOptions};

/// 2023-01-25 15:00 UTC == 09:00 in Chicago (CST) on a Wednesday.
fn nine_am_chicago() -> DateTime<Utc> {
    parse_observation_timestamp("2023-01-25 15:00:00.000000 UTC").unwrap()
}

fn pinned_options() -> ReportOptions {
    ReportOptions {
        now_utc: Some(nine_am_chicago()),
        ..Default::default()
    }
}

fn nine_to_five(day_of_week: u8) -> BusinessHoursRow {
    BusinessHoursRow {
        day_of_week,
        start_time_local: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time_local: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn test_alternating_statuses_over_the_last_hour() {
    // Local Chicago times 08:00 active, 08:30 inactive, 09:00 active with
    // now at 09:00: the 08:00-08:30 span is uptime, 08:30-09:00 downtime.
    let repo = LocalRepository::new();
    let store = StoreId::new(1);
    repo.insert_observation(store, "2023-01-25 14:00:00.000000 UTC", StoreStatus::Active);
    repo.insert_observation(store, "2023-01-25 14:30:00.000000 UTC", StoreStatus::Inactive);
    repo.insert_observation(store, "2023-01-25 15:00:00.000000 UTC", StoreStatus::Active);

    let rows = compute_report(&repo, &pinned_options()).await.unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.store_id, store);
    assert_eq!(row.uptime_last_hour, 30);
    assert_eq!(row.downtime_last_hour, 30);
    // 30 accumulated minutes round up to one hour in the day/week columns.
    assert_eq!(row.uptime_last_day, 1);
    assert_eq!(row.downtime_last_day, 1);
    assert_eq!(row.uptime_last_week, 1);
    assert_eq!(row.downtime_last_week, 1);
}

#[tokio::test]
async fn test_single_observation_yields_all_zeros() {
    let repo = LocalRepository::new();
    let store = StoreId::new(2);
    repo.insert_observation(store, "2023-01-25 14:30:00.000000 UTC", StoreStatus::Active);

    let rows = compute_report(&repo, &pinned_options()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], storemon_rust::api::ReportRow::zeroed(store));
}

#[tokio::test]
async fn test_store_with_no_in_window_observations_yields_zeros() {
    // The store id is discovered from the full observation set, but the
    // trailing-week slice is empty, so every field is zero.
    let repo = LocalRepository::new();
    let store = StoreId::new(3);
    repo.insert_observation(store, "2022-11-01 12:00:00.000000 UTC", StoreStatus::Active);
    repo.insert_observation(store, "2022-11-01 13:00:00.000000 UTC", StoreStatus::Inactive);

    let rows = compute_report(&repo, &pinned_options()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], storemon_rust::api::ReportRow::zeroed(store));
}

#[tokio::test]
async fn test_pair_ending_outside_business_hours_is_skipped() {
    // 2023-01-25 is a Wednesday (day 2). The pair ends at 08:30 local,
    // before opening, so nothing is attributed despite the 08:00 poll.
    let repo = LocalRepository::new();
    let store = StoreId::new(4);
    repo.set_business_hours(store, nine_to_five(2));
    repo.insert_observation(store, "2023-01-25 14:00:00.000000 UTC", StoreStatus::Active);
    repo.insert_observation(store, "2023-01-25 14:30:00.000000 UTC", StoreStatus::Active);

    let rows = compute_report(&repo, &pinned_options()).await.unwrap();
    assert_eq!(rows[0], storemon_rust::api::ReportRow::zeroed(store));
}

#[tokio::test]
async fn test_pair_ending_inside_business_hours_is_counted() {
    // Same store and polls, but the later poll lands exactly at opening
    // time (09:00 local, inclusive boundary).
    let repo = LocalRepository::new();
    let store = StoreId::new(5);
    repo.set_business_hours(store, nine_to_five(2));
    repo.insert_observation(store, "2023-01-25 14:30:00.000000 UTC", StoreStatus::Active);
    repo.insert_observation(store, "2023-01-25 15:00:00.000000 UTC", StoreStatus::Inactive);

    let rows = compute_report(&repo, &pinned_options()).await.unwrap();
    assert_eq!(rows[0].uptime_last_hour, 30);
    assert_eq!(rows[0].downtime_last_hour, 0);
}

#[tokio::test]
async fn test_timezone_assignment_changes_the_local_gate() {
    // Identical polls and business hours; the Denver store sees them at
    // 07:30/08:00 local (closed), the defaulted-Chicago store at
    // 08:30/09:00 local (the later point is open).
    let repo = LocalRepository::new();
    let denver = StoreId::new(6);
    let chicago = StoreId::new(7);
    repo.set_timezone(denver, "America/Denver");
    for store in [denver, chicago] {
        repo.set_business_hours(store, nine_to_five(2));
        repo.insert_observation(store, "2023-01-25 14:30:00.000000 UTC", StoreStatus::Active);
        repo.insert_observation(store, "2023-01-25 15:00:00.000000 UTC", StoreStatus::Active);
    }

    let rows = compute_report(&repo, &pinned_options()).await.unwrap();
    let denver_row = rows.iter().find(|r| r.store_id == denver).unwrap();
    let chicago_row = rows.iter().find(|r| r.store_id == chicago).unwrap();

    assert_eq!(denver_row.uptime_last_hour, 0);
    assert_eq!(chicago_row.uptime_last_hour, 30);
}

#[tokio::test]
async fn test_unrecognized_timezone_falls_back_to_chicago() {
    let repo = LocalRepository::new();
    let store = StoreId::new(8);
    repo.set_timezone(store, "Middle/Earth");
    repo.insert_observation(store, "2023-01-25 14:30:00.000000 UTC", StoreStatus::Active);
    repo.insert_observation(store, "2023-01-25 15:00:00.000000 UTC", StoreStatus::Inactive);

    let rows = compute_report(&repo, &pinned_options()).await.unwrap();
    // Same result as the defaulted store: the whole span counts.
    assert_eq!(rows[0].uptime_last_hour, 30);
}

#[tokio::test]
async fn test_older_than_week_lookback_feeds_only_the_week_bucket() {
    // One hour of uptime recorded two weeks ago: invisible to the default
    // slice, but the literal historical direction picks it up and it lands
    // in the unconditional week bucket only.
    let repo = LocalRepository::new();
    let store = StoreId::new(9);
    repo.insert_observation(store, "2023-01-04 12:00:00.000000 UTC", StoreStatus::Active);
    repo.insert_observation(store, "2023-01-04 13:00:00.000000 UTC", StoreStatus::Inactive);

    let default_rows = compute_report(&repo, &pinned_options()).await.unwrap();
    assert_eq!(default_rows[0], storemon_rust::api::ReportRow::zeroed(store));

    let literal = ReportOptions {
        now_utc: Some(nine_am_chicago()),
        lookback: LookbackMode::OlderThanLastWeek,
        ..Default::default()
    };
    let rows = compute_report(&repo, &literal).await.unwrap();
    assert_eq!(rows[0].uptime_last_hour, 0);
    assert_eq!(rows[0].uptime_last_day, 0);
    assert_eq!(rows[0].uptime_last_week, 1);
}

#[tokio::test]
async fn test_malformed_timestamp_fails_the_run() {
    let repo = LocalRepository::new();
    let good = StoreId::new(10);
    let bad = StoreId::new(11);
    repo.insert_observation(good, "2023-01-25 14:30:00.000000 UTC", StoreStatus::Active);
    repo.insert_observation(good, "2023-01-25 15:00:00.000000 UTC", StoreStatus::Active);
    repo.insert_observation(bad, "2023-01-25T14:30:00Z", StoreStatus::Active);

    let result = compute_report(&repo, &pinned_options()).await;
    assert!(matches!(
        result,
        Err(ReportError::Timestamp { store_id, .. }) if store_id == bad
    ));
}

#[tokio::test]
async fn test_rerun_is_deterministic() {
    let repo = LocalRepository::new();
    let store = StoreId::new(12);
    repo.set_business_hours(store, nine_to_five(2));
    repo.insert_observation(store, "2023-01-25 14:00:00.000000 UTC", StoreStatus::Active);
    repo.insert_observation(store, "2023-01-25 14:45:00.000000 UTC", StoreStatus::Inactive);
    repo.insert_observation(store, "2023-01-25 15:00:00.000000 UTC", StoreStatus::Active);

    let options = pinned_options();
    let first = compute_report(&repo, &options).await.unwrap();
    let second = compute_report(&repo, &options).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_all_fields_are_non_negative_across_a_mixed_fleet() {
    let repo = LocalRepository::new();
    for (id, status) in [
        (20, StoreStatus::Active),
        (21, StoreStatus::Inactive),
        (22, StoreStatus::Active),
    ] {
        let store = StoreId::new(id);
        repo.insert_observation(store, "2023-01-25 13:10:00.000000 UTC", status);
        repo.insert_observation(store, "2023-01-25 14:20:00.000000 UTC", StoreStatus::Inactive);
        repo.insert_observation(store, "2023-01-25 14:55:00.000000 UTC", StoreStatus::Active);
    }

    let rows = compute_report(&repo, &pinned_options()).await.unwrap();
    assert_eq!(rows.len(), 3);
    for row in rows {
        assert!(row.uptime_last_hour >= 0);
        assert!(row.uptime_last_day >= 0);
        assert!(row.uptime_last_week >= 0);
        assert!(row.downtime_last_hour >= 0);
        assert!(row.downtime_last_day >= 0);
        assert!(row.downtime_last_week >= 0);
    }
}

#[tokio::test]
async fn test_rows_follow_store_discovery_order() {
    let repo = LocalRepository::new();
    for id in [30, 5, 17] {
        let store = StoreId::new(id);
        repo.insert_observation(store, "2023-01-25 14:30:00.000000 UTC", StoreStatus::Active);
        repo.insert_observation(store, "2023-01-25 15:00:00.000000 UTC", StoreStatus::Active);
    }

    let rows = compute_report(&repo, &pinned_options()).await.unwrap();
    let ids: Vec<i64> = rows.iter().map(|r| r.store_id.value()).collect();
    assert_eq!(ids, vec![30, 5, 17]);
}

#[tokio::test]
async fn test_empty_observation_source_yields_empty_report() {
    let repo = LocalRepository::new();
    let rows = compute_report(&repo, &pinned_options()).await.unwrap();
    assert!(rows.is_empty());
}
