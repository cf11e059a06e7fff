//! Query-string parameters and their conversion into engine inputs.

use crate::error::ApiError;
use chrono::NaiveDate;
use medrec_core::models::{
    Category, DateRange, GroupBy, GroupingOptions, LabFilters, SortBy, SortOrder,
};
use medrec_core::{PatientId, RecordsError};
use serde::Deserialize;
use std::str::FromStr;
use utoipa::IntoParams;

pub(crate) fn patient_id(raw: &str) -> Result<PatientId, ApiError> {
    PatientId::new(raw).map_err(|e| ApiError::BadRequest(format!("invalid patient id: {e}")))
}

pub(crate) fn parse_date(name: &str, value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("{name} must be a YYYY-MM-DD date")))
}

fn parse_optional_date(name: &str, value: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_date(name, v).map(Some),
        None => Ok(None),
    }
}

/// Splits a comma-separated set. A missing or blank parameter imposes no constraint.
fn parse_set<T>(value: Option<&str>) -> Result<Option<Vec<T>>, ApiError>
where
    T: FromStr<Err = RecordsError>,
{
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.parse::<T>().map_err(ApiError::from))
        .collect::<Result<Vec<T>, ApiError>>()
        .map(Some)
}

fn parse_strings(value: Option<&str>) -> Option<Vec<String>> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    Some(
        value
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Query parameters for the grouped lab results view.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GroupedQuery {
    /// category, subcategory, date, doctor, facility, status, priority or visit.
    /// Unknown values group by category.
    pub group_by: Option<String>,
    /// date (default), status, test_name or priority.
    pub sort_by: Option<String>,
    /// asc or desc (default).
    pub sort_order: Option<String>,
    /// Inclusive start date, YYYY-MM-DD.
    pub start: Option<String>,
    /// Inclusive end date, YYYY-MM-DD.
    pub end: Option<String>,
    /// Comma-separated categories.
    pub category: Option<String>,
    /// Comma-separated result statuses.
    pub status: Option<String>,
    /// Comma-separated priorities.
    pub priority: Option<String>,
    /// Comma-separated ordering clinicians.
    pub doctor: Option<String>,
}

impl GroupedQuery {
    pub fn into_options(self) -> Result<GroupingOptions, ApiError> {
        let group_by = self
            .group_by
            .as_deref()
            .map(GroupBy::from_param)
            .unwrap_or_default();
        let sort_by = match self.sort_by.as_deref() {
            Some(v) => v.parse::<SortBy>()?,
            None => SortBy::Date,
        };
        let sort_order = match self.sort_order.as_deref() {
            Some(v) => v.parse::<SortOrder>()?,
            None => SortOrder::Desc,
        };

        let start = parse_optional_date("start", self.start.as_deref())?;
        let end = parse_optional_date("end", self.end.as_deref())?;
        let date_range = match (start, end) {
            (None, None) => None,
            (start, end) => Some(DateRange::new(
                start.unwrap_or(NaiveDate::MIN),
                end.unwrap_or(NaiveDate::MAX),
            )),
        };

        Ok(GroupingOptions {
            group_by,
            sort_by,
            sort_order,
            date_range,
            filters: LabFilters {
                category: parse_set(self.category.as_deref())?,
                status: parse_set(self.status.as_deref())?,
                priority: parse_set(self.priority.as_deref())?,
                doctor: parse_strings(self.doctor.as_deref()),
            },
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubcategoryQuery {
    /// Restrict to one category.
    pub category: Option<String>,
}

impl SubcategoryQuery {
    pub fn category(&self) -> Result<Option<Category>, ApiError> {
        match self.category.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => Ok(Some(v.parse::<Category>()?)),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PreviousQuery {
    /// Reference date, YYYY-MM-DD. Only results strictly before it are returned.
    pub before: Option<String>,
}

impl PreviousQuery {
    pub fn before(&self) -> Result<NaiveDate, ApiError> {
        parse_optional_date("before", self.before.as_deref())?
            .ok_or_else(|| ApiError::BadRequest("before is required".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medrec_core::models::{Priority, ResultStatus};

    #[test]
    fn test_empty_query_gives_default_options() {
        let options = GroupedQuery::default()
            .into_options()
            .expect("defaults should parse");
        assert_eq!(options, GroupingOptions::default());
    }

    #[test]
    fn test_grouped_query_parses_sets_and_dates() {
        let query = GroupedQuery {
            group_by: Some("status".into()),
            sort_by: Some("priority".into()),
            sort_order: Some("asc".into()),
            start: Some("2025-01-01".into()),
            category: Some("blood, urine".into()),
            status: Some("critical".into()),
            priority: Some("stat,urgent".into()),
            doctor: Some("Dr. Sarah Johnson".into()),
            ..GroupedQuery::default()
        };

        let options = query.into_options().expect("query should parse");
        assert_eq!(options.group_by, GroupBy::Status);
        assert_eq!(options.sort_by, SortBy::Priority);
        assert_eq!(options.sort_order, SortOrder::Asc);
        let range = options.date_range.expect("range");
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2025, 1, 1).expect("date"));
        assert_eq!(range.end, NaiveDate::MAX);
        assert_eq!(
            options.filters.category,
            Some(vec![Category::Blood, Category::Urine])
        );
        assert_eq!(options.filters.status, Some(vec![ResultStatus::Critical]));
        assert_eq!(
            options.filters.priority,
            Some(vec![Priority::Stat, Priority::Urgent])
        );
        assert_eq!(
            options.filters.doctor,
            Some(vec!["Dr. Sarah Johnson".to_string()])
        );
    }

    #[test]
    fn test_unknown_group_by_falls_back_but_unknown_sort_is_rejected() {
        let options = GroupedQuery {
            group_by: Some("ward".into()),
            ..GroupedQuery::default()
        }
        .into_options()
        .expect("unknown group_by should fall back");
        assert_eq!(options.group_by, GroupBy::Category);

        let err = GroupedQuery {
            sort_by: Some("colour".into()),
            ..GroupedQuery::default()
        }
        .into_options()
        .expect_err("unknown sort_by should fail");
        assert!(matches!(err, ApiError::Records(RecordsError::InvalidInput(_))));
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        let err = GroupedQuery {
            end: Some("31/12/2025".into()),
            ..GroupedQuery::default()
        }
        .into_options()
        .expect_err("bad date should fail");
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
