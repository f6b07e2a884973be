//! Behavior tests for the in-memory repository.

use chrono::NaiveTime;

use storemon_rust::api::{StoreId, StoreStatus};
use storemon_rust::db::repositories::LocalRepository;
use storemon_rust::db::repository::StatusRepository;
use storemon_rust::models::observation::{BusinessHoursRow, LookbackMode};
use storemon_rust::models::time::parse_observation_timestamp;

fn boundary() -> chrono::DateTime<chrono::Utc> {
    // Rendered as "2023-01-18 15:00:00" for the stored-string comparison.
    parse_observation_timestamp("2023-01-18 15:00:00.000000 UTC").unwrap()
}

#[tokio::test]
async fn test_store_ids_enumerate_in_first_seen_order() {
    let repo = LocalRepository::new();
    repo.insert_observation(StoreId::new(9), "2023-01-25 14:00:00.000000 UTC", StoreStatus::Active);
    repo.insert_observation(StoreId::new(3), "2023-01-25 14:00:00.000000 UTC", StoreStatus::Active);
    repo.insert_observation(StoreId::new(9), "2023-01-25 15:00:00.000000 UTC", StoreStatus::Active);
    repo.insert_observation(StoreId::new(5), "2023-01-25 14:00:00.000000 UTC", StoreStatus::Active);

    let ids = repo.fetch_store_ids().await.unwrap();
    assert_eq!(ids, vec![StoreId::new(9), StoreId::new(3), StoreId::new(5)]);
}

#[tokio::test]
async fn test_fetch_observations_filters_by_store() {
    let repo = LocalRepository::new();
    repo.insert_observation(StoreId::new(1), "2023-01-25 14:00:00.000000 UTC", StoreStatus::Active);
    repo.insert_observation(StoreId::new(2), "2023-01-25 14:00:00.000000 UTC", StoreStatus::Inactive);

    let rows = repo
        .fetch_observations(StoreId::new(1), boundary(), LookbackMode::WithinLastWeek)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].store_id, StoreId::new(1));
    assert_eq!(rows[0].status, StoreStatus::Active);
}

#[tokio::test]
async fn test_fetch_observations_orders_by_stored_timestamp() {
    let repo = LocalRepository::new();
    let store = StoreId::new(1);
    repo.insert_observation(store, "2023-01-25 15:00:00.000000 UTC", StoreStatus::Active);
    repo.insert_observation(store, "2023-01-25 13:00:00.000000 UTC", StoreStatus::Inactive);
    repo.insert_observation(store, "2023-01-25 14:00:00.000000 UTC", StoreStatus::Active);

    let rows = repo
        .fetch_observations(store, boundary(), LookbackMode::WithinLastWeek)
        .await
        .unwrap();
    let stamps: Vec<&str> = rows.iter().map(|r| r.timestamp_utc.as_str()).collect();
    assert_eq!(
        stamps,
        vec![
            "2023-01-25 13:00:00.000000 UTC",
            "2023-01-25 14:00:00.000000 UTC",
            "2023-01-25 15:00:00.000000 UTC",
        ]
    );
}

#[tokio::test]
async fn test_lookback_directions_split_on_the_boundary() {
    let repo = LocalRepository::new();
    let store = StoreId::new(1);
    repo.insert_observation(store, "2023-01-04 12:00:00.000000 UTC", StoreStatus::Active);
    repo.insert_observation(store, "2023-01-25 12:00:00.000000 UTC", StoreStatus::Active);

    let within = repo
        .fetch_observations(store, boundary(), LookbackMode::WithinLastWeek)
        .await
        .unwrap();
    assert_eq!(within.len(), 1);
    assert!(within[0].timestamp_utc.starts_with("2023-01-25"));

    let older = repo
        .fetch_observations(store, boundary(), LookbackMode::OlderThanLastWeek)
        .await
        .unwrap();
    assert_eq!(older.len(), 1);
    assert!(older[0].timestamp_utc.starts_with("2023-01-04"));
}

#[tokio::test]
async fn test_timezone_lookup() {
    let repo = LocalRepository::new();
    let store = StoreId::new(4);
    assert_eq!(repo.fetch_timezone(store).await.unwrap(), None);

    repo.set_timezone(store, "America/Phoenix");
    assert_eq!(
        repo.fetch_timezone(store).await.unwrap(),
        Some("America/Phoenix".to_string())
    );
}

#[tokio::test]
async fn test_business_hours_lookup_is_per_day() {
    let repo = LocalRepository::new();
    let store = StoreId::new(4);
    let rule = BusinessHoursRow {
        day_of_week: 1,
        start_time_local: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        end_time_local: NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
    };
    repo.set_business_hours(store, rule);

    assert_eq!(repo.fetch_business_hours(store, 1).await.unwrap(), Some(rule));
    assert_eq!(repo.fetch_business_hours(store, 2).await.unwrap(), None);
    assert_eq!(repo.fetch_business_hours(StoreId::new(5), 1).await.unwrap(), None);
}

#[tokio::test]
async fn test_health_check() {
    let repo = LocalRepository::new();
    assert!(repo.health_check().await.unwrap());
}
