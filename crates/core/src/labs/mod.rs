//! # Lab result aggregation
//!
//! Pure query-time functions over a [`PatientRecord`](crate::models::PatientRecord) snapshot.
//!
//! The grouped view runs as a pipeline:
//!
//! 1. [`filter`] keeps results matching every supplied filter set and the date range
//! 2. [`grouping`] partitions the survivors along one dimension
//! 3. [`sort`] orders each group's members
//! 4. [`rollup`] derives each group's status, trend and date span
//!
//! Groups are then ordered by date-range start (when sorting by date) or by name.
//!
//! Nothing here performs I/O or returns an error; unknown ids and names produce empty or
//! zero-valued answers.

pub mod filter;
pub mod grouping;
pub mod lookups;
pub mod ranking;
pub mod responses;
pub mod rollup;
pub mod sort;
pub mod trend;
pub mod visit_summary;

use crate::config::DateBucketPolicy;
use crate::models::{GroupBy, GroupingOptions, LabGroup, SortBy, SortOrder, TestResult};
use chrono::NaiveDate;

pub use trend::{TrendAnalysis, TrendDetails};
pub use visit_summary::{StatusCounts, TrendTally, VisitSummary};

/// Filter, partition, sort and roll up `results` according to `options`.
pub fn grouped_lab_results(
    results: &[TestResult],
    options: &GroupingOptions,
    policy: &DateBucketPolicy,
    today: NaiveDate,
) -> Vec<LabGroup> {
    let filtered = filter::filter_results(results, &options.filters, options.date_range.as_ref());
    if filtered.is_empty() {
        return Vec::new();
    }

    let partitions = grouping::partition(filtered, options.group_by, policy, today);

    let mut groups: Vec<LabGroup> = partitions
        .into_iter()
        .filter_map(|(key, mut members)| {
            let first = *members.first()?;
            let category = first.category;
            let subcategory = match options.group_by {
                GroupBy::Subcategory => key.clone(),
                _ => first.subcategory.clone(),
            };

            sort::sort_results(&mut members, options.sort_by, options.sort_order);

            let date_range = rollup::rollup_date_range(&members)?;
            Some(LabGroup {
                id: grouping::group_id(&key),
                status: rollup::rollup_status(members.iter().map(|r| r.status)),
                trend: rollup::rollup_trend(&members),
                results: members.into_iter().cloned().collect(),
                name: key,
                category,
                subcategory: Some(subcategory),
                date_range,
            })
        })
        .collect();

    order_groups(&mut groups, options.sort_by, options.sort_order);
    groups
}

fn order_groups(groups: &mut [LabGroup], sort_by: SortBy, order: SortOrder) {
    match (sort_by, order) {
        (SortBy::Date, SortOrder::Asc) => {
            groups.sort_by(|a, b| a.date_range.start.cmp(&b.date_range.start))
        }
        (SortBy::Date, SortOrder::Desc) => {
            groups.sort_by(|a, b| b.date_range.start.cmp(&a.date_range.start))
        }
        _ => groups.sort_by(|a, b| a.name.cmp(&b.name)),
    }
}
