use chrono::TimeZone;
use chrono_tz::Tz;

use crate::api::StoreStatus;
use crate::report::interpolator::{attribute_durations, LocalObservation};

const CHICAGO: Tz = chrono_tz::America::Chicago;

fn obs(h: u32, m: u32, status: StoreStatus) -> LocalObservation {
    LocalObservation {
        timestamp_local: CHICAGO.with_ymd_and_hms(2023, 1, 25, h, m, 0).unwrap(),
        status,
    }
}

#[test]
fn test_pair_credits_earlier_status() {
    let observations = vec![
        obs(8, 0, StoreStatus::Active),
        obs(8, 30, StoreStatus::Inactive),
    ];
    let attributed = attribute_durations(&observations, &[true, true]);

    assert_eq!(attributed.len(), 1);
    assert_eq!(attributed[0].status, StoreStatus::Active);
    assert_eq!(attributed[0].minutes, 30.0);
    assert_eq!(attributed[0].recorded_at, observations[1].timestamp_local);
}

#[test]
fn test_no_predecessor_attributes_nothing() {
    assert!(attribute_durations(&[], &[]).is_empty());
    assert!(attribute_durations(&[obs(8, 0, StoreStatus::Active)], &[true]).is_empty());
}

#[test]
fn test_closed_later_point_skips_the_pair() {
    let observations = vec![
        obs(8, 0, StoreStatus::Active),
        obs(8, 30, StoreStatus::Inactive),
    ];
    let attributed = attribute_durations(&observations, &[true, false]);
    assert!(attributed.is_empty());
}

#[test]
fn test_prev_advances_even_when_closed() {
    // Middle observation is out of hours: its pair is skipped, but the
    // final span is still measured from it, not from the first point.
    let observations = vec![
        obs(8, 0, StoreStatus::Active),
        obs(9, 0, StoreStatus::Inactive),
        obs(10, 0, StoreStatus::Active),
    ];
    let attributed = attribute_durations(&observations, &[true, false, true]);

    assert_eq!(attributed.len(), 1);
    assert_eq!(attributed[0].status, StoreStatus::Inactive);
    assert_eq!(attributed[0].minutes, 60.0);
}

#[test]
fn test_equal_timestamps_yield_zero_length_span() {
    let observations = vec![
        obs(8, 0, StoreStatus::Active),
        obs(8, 0, StoreStatus::Inactive),
    ];
    let attributed = attribute_durations(&observations, &[true, true]);
    assert_eq!(attributed.len(), 1);
    assert_eq!(attributed[0].minutes, 0.0);
}

#[test]
fn test_chain_attributes_every_open_pair() {
    let observations = vec![
        obs(8, 0, StoreStatus::Active),
        obs(8, 30, StoreStatus::Inactive),
        obs(9, 0, StoreStatus::Active),
    ];
    let attributed = attribute_durations(&observations, &[true, true, true]);

    assert_eq!(attributed.len(), 2);
    assert_eq!(attributed[0].status, StoreStatus::Active);
    assert_eq!(attributed[1].status, StoreStatus::Inactive);
    assert_eq!(attributed[0].minutes + attributed[1].minutes, 60.0);
}
