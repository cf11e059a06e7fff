//! Per-visit roll-up of linked test results.

use crate::models::{ResultStatus, TestResult, TrendDirection, Visit};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatusCounts {
    pub total_tests: usize,
    pub normal_results: usize,
    pub abnormal_results: usize,
    pub critical_results: usize,
    pub follow_up_required: usize,
}

/// Tally of the recorded `trend_direction` of each linked result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TrendTally {
    pub improving: usize,
    pub stable: usize,
    pub declining: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VisitSummary {
    pub visit_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<NaiveDate>,
    pub tests: Vec<TestResult>,
    pub summary: StatusCounts,
    pub trends: TrendTally,
}

/// Summarize every result linked to `visit_id`.
///
/// An unknown visit id produces a zero-valued summary.
pub fn summarize_visit(results: &[TestResult], visits: &[Visit], visit_id: &str) -> VisitSummary {
    let tests: Vec<TestResult> = results
        .iter()
        .filter(|r| r.visit_id.as_deref() == Some(visit_id))
        .cloned()
        .collect();

    let mut summary = StatusCounts {
        total_tests: tests.len(),
        ..StatusCounts::default()
    };
    let mut trends = TrendTally::default();

    for test in &tests {
        match test.status {
            ResultStatus::Normal => summary.normal_results += 1,
            ResultStatus::Abnormal => summary.abnormal_results += 1,
            ResultStatus::Critical => summary.critical_results += 1,
        }
        if test.follow_up_required {
            summary.follow_up_required += 1;
        }
        match test.trend_direction {
            Some(TrendDirection::Improving) => trends.improving += 1,
            Some(TrendDirection::Stable) => trends.stable += 1,
            Some(TrendDirection::Declining) => trends.declining += 1,
            None => {}
        }
    }

    let visit_date = tests
        .first()
        .and_then(|t| t.visit_date)
        .or_else(|| visits.iter().find(|v| v.id == visit_id).map(|v| v.date));

    VisitSummary {
        visit_id: visit_id.to_string(),
        visit_date,
        tests,
        summary,
        trends,
    }
}
