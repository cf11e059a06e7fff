//! Simple projections over a patient record: distinct values, history and visit lookups.

use crate::models::{Category, TestResult, Visit, VisitDetail};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::hash::Hash;

fn distinct<T, I>(values: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

/// Categories present in `results`, in first-seen order.
pub fn categories(results: &[TestResult]) -> Vec<Category> {
    distinct(results.iter().map(|r| r.category))
}

/// Subcategories present in `results`, optionally restricted to one category.
pub fn subcategories(results: &[TestResult], category: Option<Category>) -> Vec<String> {
    distinct(
        results
            .iter()
            .filter(|r| category.map_or(true, |c| r.category == c))
            .map(|r| r.subcategory.clone()),
    )
}

/// Ordering clinicians present in `results`.
pub fn doctors(results: &[TestResult]) -> Vec<String> {
    distinct(results.iter().map(|r| r.doctor.clone()))
}

pub fn facilities(results: &[TestResult]) -> Vec<String> {
    distinct(results.iter().map(|r| r.facility.clone()))
}

/// Results named `test_name` dated strictly before `before`, newest first.
pub fn previous_results(results: &[TestResult], test_name: &str, before: NaiveDate) -> Vec<TestResult> {
    let mut previous: Vec<TestResult> = results
        .iter()
        .filter(|r| r.test_name == test_name && r.date < before)
        .cloned()
        .collect();
    previous.sort_by(|a, b| b.date.cmp(&a.date));
    previous
}

/// Baseline-flagged results, oldest first.
pub fn baseline_results(results: &[TestResult]) -> Vec<TestResult> {
    let mut baseline: Vec<TestResult> = results.iter().filter(|r| r.is_baseline).cloned().collect();
    baseline.sort_by(|a, b| a.date.cmp(&b.date));
    baseline
}

pub fn visits_newest_first(visits: &[Visit]) -> Vec<Visit> {
    let mut sorted = visits.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Visits attended by `doctor_id`, newest first.
pub fn visits_by_doctor(visits: &[Visit], doctor_id: &str) -> Vec<Visit> {
    let mut matching: Vec<Visit> = visits
        .iter()
        .filter(|v| v.doctor_id == doctor_id)
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.date.cmp(&a.date));
    matching
}

/// Visits requiring follow-up with a follow-up date strictly after `today`, soonest first.
pub fn upcoming_follow_ups(visits: &[Visit], today: NaiveDate) -> Vec<Visit> {
    let mut upcoming: Vec<(NaiveDate, &Visit)> = visits
        .iter()
        .filter(|v| v.follow_up_required)
        .filter_map(|v| v.follow_up_date.map(|due| (due, v)))
        .filter(|(due, _)| *due > today)
        .collect();
    upcoming.sort_by_key(|(due, _)| *due);
    upcoming.into_iter().map(|(_, v)| v.clone()).collect()
}

/// The visit with `visit_id` joined with the results that reference it.
pub fn visit_detail(results: &[TestResult], visits: &[Visit], visit_id: &str) -> Option<VisitDetail> {
    let visit = visits.iter().find(|v| v.id == visit_id)?;
    Some(VisitDetail {
        visit: visit.clone(),
        lab_results: results
            .iter()
            .filter(|r| r.visit_id.as_deref() == Some(visit_id))
            .cloned()
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResultStatus;
    use crate::test_support::{date, lab, visit};

    fn result_ids(results: &[TestResult]) -> Vec<&str> {
        results.iter().map(|r| r.id.as_str()).collect()
    }

    fn visit_ids(visits: &[Visit]) -> Vec<&str> {
        visits.iter().map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn test_enumerations_are_distinct_in_first_seen_order() {
        let mut urine = lab("2", "Urinalysis", "2025-06-15", ResultStatus::Normal);
        urine.category = Category::Urine;
        urine.subcategory = "Routine".into();
        urine.facility = "North Clinic".into();
        let mut lipid = lab("3", "Lipid Panel", "2025-08-15", ResultStatus::Abnormal);
        lipid.subcategory = "Lipids".into();
        lipid.doctor = "Dr. Emily Davis".into();
        let results = vec![
            lab("1", "Complete Blood Count", "2025-09-20", ResultStatus::Normal),
            urine,
            lipid,
        ];

        assert_eq!(categories(&results), vec![Category::Blood, Category::Urine]);
        assert_eq!(
            subcategories(&results, None),
            vec!["Chemistry", "Routine", "Lipids"]
        );
        assert_eq!(
            subcategories(&results, Some(Category::Blood)),
            vec!["Chemistry", "Lipids"]
        );
        assert!(subcategories(&results, Some(Category::Imaging)).is_empty());
        assert_eq!(doctors(&results), vec!["Dr. Sarah Johnson", "Dr. Emily Davis"]);
        assert_eq!(facilities(&results), vec!["Central Lab", "North Clinic"]);
    }

    #[test]
    fn test_previous_results_are_strictly_earlier_and_newest_first() {
        let results = vec![
            lab("1", "Lipid Panel", "2025-03-15", ResultStatus::Abnormal),
            lab("2", "Lipid Panel", "2025-09-15", ResultStatus::Normal),
            lab("3", "Lipid Panel", "2025-06-15", ResultStatus::Normal),
            lab("4", "Urinalysis", "2025-01-15", ResultStatus::Normal),
        ];

        let previous = previous_results(&results, "Lipid Panel", date("2025-09-15"));
        assert_eq!(result_ids(&previous), vec!["3", "1"]);
        assert!(previous_results(&results, "Lipid Panel", date("2025-03-15")).is_empty());
    }

    #[test]
    fn test_baseline_results_are_oldest_first() {
        let mut later = lab("1", "Lipid Panel", "2025-03-15", ResultStatus::Normal);
        later.is_baseline = true;
        let mut earlier = lab("2", "Complete Blood Count", "2024-03-15", ResultStatus::Normal);
        earlier.is_baseline = true;
        let plain = lab("3", "Lipid Panel", "2023-03-15", ResultStatus::Normal);

        let baseline = baseline_results(&[later, earlier, plain]);
        assert_eq!(result_ids(&baseline), vec!["2", "1"]);
    }

    #[test]
    fn test_visits_are_newest_first_and_filter_by_doctor() {
        let visits = vec![
            visit("v1", "2025-01-10", "doc-1"),
            visit("v2", "2025-06-10", "doc-2"),
            visit("v3", "2025-09-10", "doc-1"),
        ];

        assert_eq!(visit_ids(&visits_newest_first(&visits)), vec!["v3", "v2", "v1"]);
        assert_eq!(visit_ids(&visits_by_doctor(&visits, "doc-1")), vec!["v3", "v1"]);
        assert!(visits_by_doctor(&visits, "doc-9").is_empty());
    }

    #[test]
    fn test_upcoming_follow_ups_are_future_and_soonest_first() {
        let today = date("2025-10-05");
        let mut later = visit("v1", "2025-09-01", "doc-1");
        later.follow_up_required = true;
        later.follow_up_date = Some(date("2025-12-01"));
        let mut sooner = visit("v2", "2025-09-02", "doc-1");
        sooner.follow_up_required = true;
        sooner.follow_up_date = Some(date("2025-10-20"));
        let mut due_today = visit("v3", "2025-09-03", "doc-1");
        due_today.follow_up_required = true;
        due_today.follow_up_date = Some(today);
        let mut not_required = visit("v4", "2025-09-04", "doc-1");
        not_required.follow_up_date = Some(date("2025-11-01"));
        let mut undated = visit("v5", "2025-09-05", "doc-1");
        undated.follow_up_required = true;

        let upcoming =
            upcoming_follow_ups(&[later, sooner, due_today, not_required, undated], today);
        assert_eq!(visit_ids(&upcoming), vec!["v2", "v1"]);
    }

    #[test]
    fn test_visit_detail_joins_linked_results() {
        let visits = vec![visit("v1", "2025-09-20", "doc-1")];
        let mut linked = lab("1", "Lipid Panel", "2025-09-20", ResultStatus::Normal);
        linked.visit_id = Some("v1".into());
        let unlinked = lab("2", "Lipid Panel", "2025-09-20", ResultStatus::Normal);
        let results = vec![linked, unlinked];

        let detail = visit_detail(&results, &visits, "v1").expect("visit exists");
        assert_eq!(detail.visit.id, "v1");
        assert_eq!(result_ids(&detail.lab_results), vec!["1"]);
        assert!(visit_detail(&results, &visits, "v9").is_none());
    }
}
