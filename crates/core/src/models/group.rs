use super::enums::{Category, GroupBy, Priority, ResultStatus, SortBy, SortOrder, TrendDirection};
use super::lab::TestResult;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive calendar date range.
///
/// A range whose `start` is after its `end` matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The range matched by both `self` and `other`.
    pub fn intersect(&self, other: &DateRange) -> DateRange {
        DateRange {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        }
    }
}

/// Optional filter sets; an absent set imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LabFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<ResultStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Vec<Priority>>,
    /// Ordering clinicians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<Vec<String>>,
}

/// Query object for grouped lab results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GroupingOptions {
    #[serde(default)]
    pub group_by: GroupBy,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(default)]
    pub filters: LabFilters,
}

impl Default for GroupingOptions {
    fn default() -> Self {
        Self {
            group_by: GroupBy::Category,
            sort_by: SortBy::Date,
            sort_order: SortOrder::Desc,
            date_range: None,
            filters: LabFilters::default(),
        }
    }
}

/// A query-time partition of test results with its rolled-up status and trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LabGroup {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub results: Vec<TestResult>,
    pub date_range: DateRange,
    pub status: ResultStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendDirection>,
}
