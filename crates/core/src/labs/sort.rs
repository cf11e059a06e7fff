//! Stable ordering of group members.

use super::ranking::{priority_rank, status_rank};
use crate::models::{SortBy, SortOrder, TestResult};
use std::cmp::Ordering;

/// Natural (ascending) comparison of two results by `sort_by`.
pub fn compare_results(a: &TestResult, b: &TestResult, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Date => a.date.cmp(&b.date),
        SortBy::Status => status_rank(a.status).cmp(&status_rank(b.status)),
        SortBy::TestName => a.test_name.cmp(&b.test_name),
        SortBy::Priority => priority_rank(a.priority).cmp(&priority_rank(b.priority)),
    }
}

/// Sort in place. Equal keys keep their relative order in both directions.
pub fn sort_results(results: &mut [&TestResult], sort_by: SortBy, order: SortOrder) {
    results.sort_by(|a, b| {
        let ordering = compare_results(a, b, sort_by);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, ResultStatus};
    use crate::test_support::lab;
    use proptest::prelude::*;

    fn ids(results: &[&TestResult]) -> Vec<String> {
        results.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_status_sort_uses_severity_rank() {
        let normal = lab("n", "A", "2025-01-01", ResultStatus::Normal);
        let critical = lab("c", "A", "2025-01-01", ResultStatus::Critical);
        let abnormal = lab("a", "A", "2025-01-01", ResultStatus::Abnormal);
        let mut members = vec![&normal, &critical, &abnormal];

        sort_results(&mut members, SortBy::Status, SortOrder::Desc);
        assert_eq!(ids(&members), vec!["c", "a", "n"]);

        sort_results(&mut members, SortBy::Status, SortOrder::Asc);
        assert_eq!(ids(&members), vec!["n", "a", "c"]);
    }

    #[test]
    fn test_priority_sort_uses_urgency_rank() {
        let mut stat = lab("s", "A", "2025-01-01", ResultStatus::Normal);
        stat.priority = Priority::Stat;
        let mut urgent = lab("u", "A", "2025-01-01", ResultStatus::Normal);
        urgent.priority = Priority::Urgent;
        let routine = lab("r", "A", "2025-01-01", ResultStatus::Normal);
        let mut members = vec![&routine, &stat, &urgent];

        sort_results(&mut members, SortBy::Priority, SortOrder::Desc);
        assert_eq!(ids(&members), vec!["s", "u", "r"]);
    }

    #[test]
    fn test_name_and_date_sorts() {
        let lipid = lab("l", "Lipid Panel", "2025-08-15", ResultStatus::Normal);
        let cbc = lab("c", "Complete Blood Count", "2025-09-20", ResultStatus::Normal);
        let mut members = vec![&lipid, &cbc];

        sort_results(&mut members, SortBy::TestName, SortOrder::Asc);
        assert_eq!(ids(&members), vec!["c", "l"]);

        sort_results(&mut members, SortBy::Date, SortOrder::Desc);
        assert_eq!(ids(&members), vec!["c", "l"]);

        sort_results(&mut members, SortBy::Date, SortOrder::Asc);
        assert_eq!(ids(&members), vec!["l", "c"]);
    }

    #[test]
    fn test_descending_sort_keeps_ties_in_input_order() {
        let first = lab("1", "A", "2025-01-01", ResultStatus::Normal);
        let second = lab("2", "A", "2025-01-01", ResultStatus::Normal);
        let third = lab("3", "A", "2025-01-01", ResultStatus::Critical);
        let mut members = vec![&first, &second, &third];

        sort_results(&mut members, SortBy::Status, SortOrder::Desc);
        assert_eq!(ids(&members), vec!["3", "1", "2"]);
    }

    proptest! {
        #[test]
        fn test_sorting_is_stable_for_every_key(
            statuses in proptest::collection::vec(proptest::sample::select(ResultStatus::ALL.to_vec()), 0..25),
            sort_by in proptest::sample::select(SortBy::ALL.to_vec()),
            order in proptest::sample::select(SortOrder::ALL.to_vec()),
        ) {
            let results: Vec<TestResult> = statuses
                .iter()
                .enumerate()
                .map(|(i, status)| lab(&format!("{i:03}"), "Panel", "2025-01-01", *status))
                .collect();
            let mut members: Vec<&TestResult> = results.iter().collect();

            sort_results(&mut members, sort_by, order);

            for pair in members.windows(2) {
                if compare_results(pair[0], pair[1], sort_by) == Ordering::Equal {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }
    }
}
