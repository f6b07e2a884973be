//! Business-hours evaluation.
//!
//! A store's business hours are a per-weekday local-time interval. The
//! evaluator answers one question: does a local timestamp fall inside the
//! store's open interval for that day?

use std::collections::HashMap;

use chrono::NaiveTime;

use crate::api::StoreId;
use crate::db::repository::{RepositoryResult, StatusRepository};
use crate::models::observation::BusinessHoursRow;

/// Whether `t` falls inside the rule's open interval.
///
/// A missing rule means the store is open all day. Bounds are inclusive on
/// both ends. A rule with `end < start` never matches: overnight ranges are
/// not folded across midnight, so such a rule is an empty interval.
pub fn is_open_at(rule: Option<&BusinessHoursRow>, t: NaiveTime) -> bool {
    match rule {
        None => true,
        Some(rule) => rule.start_time_local <= t && t <= rule.end_time_local,
    }
}

/// Per-run cache of one store's business-hours rules.
///
/// The evaluator is consulted once per observation, but rules only vary by
/// weekday, so at most seven lookups hit the repository per store.
pub struct BusinessHoursCache {
    store_id: StoreId,
    rules: HashMap<u8, Option<BusinessHoursRow>>,
}

impl BusinessHoursCache {
    pub fn new(store_id: StoreId) -> Self {
        Self {
            store_id,
            rules: HashMap::new(),
        }
    }

    /// Fetch (or reuse) the rule for a weekday and evaluate `t` against it.
    pub async fn is_open(
        &mut self,
        repo: &dyn StatusRepository,
        day_of_week: u8,
        t: NaiveTime,
    ) -> RepositoryResult<bool> {
        if !self.rules.contains_key(&day_of_week) {
            let rule = repo.fetch_business_hours(self.store_id, day_of_week).await?;
            self.rules.insert(day_of_week, rule);
        }
        Ok(is_open_at(self.rules[&day_of_week].as_ref(), t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nine_to_five(day_of_week: u8) -> BusinessHoursRow {
        BusinessHoursRow {
            day_of_week,
            start_time_local: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time_local: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let rule = nine_to_five(0);
        assert!(is_open_at(Some(&rule), at(9, 0)));
        assert!(is_open_at(Some(&rule), at(17, 0)));
        assert!(is_open_at(Some(&rule), at(12, 30)));
    }

    #[test]
    fn test_outside_bounds_is_closed() {
        let rule = nine_to_five(0);
        assert!(!is_open_at(Some(&rule), at(8, 59)));
        assert!(!is_open_at(Some(&rule), at(17, 1)));
        assert!(!is_open_at(Some(&rule), at(0, 0)));
    }

    #[test]
    fn test_missing_rule_is_open_all_day() {
        assert!(is_open_at(None, at(0, 0)));
        assert!(is_open_at(None, at(12, 0)));
        assert!(is_open_at(None, at(23, 59)));
    }

    #[test]
    fn test_overnight_rule_is_empty() {
        let rule = BusinessHoursRow {
            day_of_week: 4,
            start_time_local: at(22, 0),
            end_time_local: at(2, 0),
        };
        assert!(!is_open_at(Some(&rule), at(23, 0)));
        assert!(!is_open_at(Some(&rule), at(1, 0)));
        assert!(!is_open_at(Some(&rule), at(12, 0)));
    }
}
