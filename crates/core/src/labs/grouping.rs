//! Partitioning of test results along one grouping dimension.

use crate::config::DateBucketPolicy;
use crate::constants::SYNTHETIC_VISIT_PREFIX;
use crate::models::{GroupBy, TestResult};
use chrono::NaiveDate;
use indexmap::IndexMap;

/// Whole calendar days between `date` and `today`, in either direction.
pub fn days_from_today(date: NaiveDate, today: NaiveDate) -> i64 {
    (today - date).num_days().abs()
}

/// The group key of `result` for the given dimension.
pub fn group_key(
    result: &TestResult,
    group_by: GroupBy,
    policy: &DateBucketPolicy,
    today: NaiveDate,
) -> String {
    match group_by {
        GroupBy::Category => result.category.as_str().to_string(),
        GroupBy::Subcategory => result.subcategory.clone(),
        GroupBy::Date => policy
            .label_for(days_from_today(result.date, today))
            .to_string(),
        GroupBy::Doctor => result.doctor.clone(),
        GroupBy::Facility => result.facility.clone(),
        GroupBy::Status => result.status.as_str().to_string(),
        GroupBy::Priority => result.priority.as_str().to_string(),
        GroupBy::Visit => match &result.visit_id {
            Some(id) => id.clone(),
            None => format!("{SYNTHETIC_VISIT_PREFIX} {}", result.date),
        },
    }
}

/// Partition `results` by key. Keys keep first-seen order and members keep input order.
pub fn partition<'a>(
    results: Vec<&'a TestResult>,
    group_by: GroupBy,
    policy: &DateBucketPolicy,
    today: NaiveDate,
) -> IndexMap<String, Vec<&'a TestResult>> {
    let mut groups: IndexMap<String, Vec<&'a TestResult>> = IndexMap::new();
    for result in results {
        groups
            .entry(group_key(result, group_by, policy, today))
            .or_default()
            .push(result);
    }
    groups
}

/// Stable identifier for a group: lower-cased key with whitespace runs replaced by `-`.
pub fn group_id(key: &str) -> String {
    key.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}
