//! Conjunctive filtering of test results.

use crate::models::{DateRange, LabFilters, TestResult};

fn allows<T: PartialEq>(set: &Option<Vec<T>>, value: &T) -> bool {
    set.as_ref().map_or(true, |values| values.contains(value))
}

fn intersect<T: PartialEq + Clone>(a: &Option<Vec<T>>, b: &Option<Vec<T>>) -> Option<Vec<T>> {
    match (a, b) {
        (None, None) => None,
        (Some(only), None) | (None, Some(only)) => Some(only.clone()),
        (Some(a), Some(b)) => Some(a.iter().filter(|v| b.contains(v)).cloned().collect()),
    }
}

impl LabFilters {
    /// True when `result` satisfies every supplied filter set.
    pub fn matches(&self, result: &TestResult) -> bool {
        allows(&self.category, &result.category)
            && allows(&self.status, &result.status)
            && allows(&self.priority, &result.priority)
            && allows(&self.doctor, &result.doctor)
    }

    /// Filters that match exactly what both `self` and `other` match.
    pub fn and(&self, other: &LabFilters) -> LabFilters {
        LabFilters {
            category: intersect(&self.category, &other.category),
            status: intersect(&self.status, &other.status),
            priority: intersect(&self.priority, &other.priority),
            doctor: intersect(&self.doctor, &other.doctor),
        }
    }
}

/// Returns the results matching `filters` and `date_range`, preserving input order.
pub fn filter_results<'a, I>(
    results: I,
    filters: &LabFilters,
    date_range: Option<&DateRange>,
) -> Vec<&'a TestResult>
where
    I: IntoIterator<Item = &'a TestResult>,
{
    results
        .into_iter()
        .filter(|r| filters.matches(r))
        .filter(|r| date_range.map_or(true, |range| range.contains(r.date)))
        .collect()
}
