//! Per-group aggregation: worst-case status, first-vs-last trend, and date span.

use super::ranking::worst_status;
use crate::models::{DateRange, ResultStatus, TestResult, TrendDirection};

/// Critical if any member is critical, else abnormal if any is abnormal, else normal.
pub fn rollup_status<I>(statuses: I) -> ResultStatus
where
    I: IntoIterator<Item = ResultStatus>,
{
    statuses
        .into_iter()
        .fold(ResultStatus::Normal, worst_status)
}

/// Compares the chronologically first and last members.
///
/// Only critical→normal (improving) and normal→critical (declining) are treated as movement;
/// every other pair is stable. Groups with fewer than two members have no trend.
pub fn rollup_trend(members: &[&TestResult]) -> Option<TrendDirection> {
    if members.len() < 2 {
        return None;
    }

    let mut by_date: Vec<&TestResult> = members.to_vec();
    by_date.sort_by(|a, b| a.date.cmp(&b.date));

    let first = by_date.first()?.status;
    let last = by_date.last()?.status;

    Some(match (first, last) {
        (ResultStatus::Critical, ResultStatus::Normal) => TrendDirection::Improving,
        (ResultStatus::Normal, ResultStatus::Critical) => TrendDirection::Declining,
        _ => TrendDirection::Stable,
    })
}

/// Earliest and latest member dates, or `None` for an empty group.
pub fn rollup_date_range(members: &[&TestResult]) -> Option<DateRange> {
    let start = members.iter().map(|r| r.date).min()?;
    let end = members.iter().map(|r| r.date).max()?;
    Some(DateRange::new(start, end))
}
