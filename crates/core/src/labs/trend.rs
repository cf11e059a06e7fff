//! Latest-versus-previous trend classification for a single named test.

use crate::models::{ResultStatus, Significance, TestResult, Trend, TrendDirection};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TrendDetails {
    pub direction: String,
    pub significance: Significance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// History of one test with the latest reading classified against the one before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TrendAnalysis {
    pub test_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_result: Option<TestResult>,
    /// Every earlier result, oldest first.
    pub previous_results: Vec<TestResult>,
    pub trend: Trend,
    pub trend_details: TrendDetails,
}

/// Outcome of comparing two consecutive readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub direction: TrendDirection,
    pub significance: Significance,
    pub recommendation: &'static str,
}

/// Classify a change from `previous` to `current`.
pub fn classify_transition(previous: ResultStatus, current: ResultStatus) -> Transition {
    use ResultStatus::{Abnormal, Critical, Normal};

    let (direction, significance, recommendation) = match (previous, current) {
        (Critical, Normal) => (
            TrendDirection::Improving,
            Significance::High,
            "Excellent improvement! Continue current treatment.",
        ),
        (Abnormal, Normal) => (
            TrendDirection::Improving,
            Significance::Moderate,
            "Good improvement. Monitor for continued progress.",
        ),
        (Normal, Critical) => (
            TrendDirection::Declining,
            Significance::High,
            "Immediate attention required. Contact your doctor.",
        ),
        (Normal, Abnormal) => (
            TrendDirection::Declining,
            Significance::Moderate,
            "Monitor closely. Consider follow-up testing.",
        ),
        _ => (
            TrendDirection::Stable,
            Significance::Low,
            "Continue current monitoring schedule.",
        ),
    };

    Transition {
        direction,
        significance,
        recommendation,
    }
}

fn direction_label(trend: Trend) -> &'static str {
    match trend {
        Trend::Improving => "Improving",
        Trend::Declining => "Declining",
        Trend::Stable => "Stable",
        Trend::NoData => "No data available",
    }
}

/// Analyze the full history of `test_name` within `results`.
///
/// No history yields [`Trend::NoData`]; a single reading is stable with no recommendation.
pub fn analyze_trend(results: &[TestResult], test_name: &str) -> TrendAnalysis {
    let mut history: Vec<&TestResult> = results
        .iter()
        .filter(|r| r.test_name == test_name)
        .collect();
    history.sort_by(|a, b| a.date.cmp(&b.date));

    let Some((current, previous)) = history.split_last() else {
        return TrendAnalysis {
            test_name: test_name.to_string(),
            current_result: None,
            previous_results: Vec::new(),
            trend: Trend::NoData,
            trend_details: TrendDetails {
                direction: direction_label(Trend::NoData).to_string(),
                significance: Significance::Low,
                recommendation: None,
            },
        };
    };

    let (trend, significance, recommendation) = match previous.last() {
        Some(before) => {
            let transition = classify_transition(before.status, current.status);
            (
                Trend::from(transition.direction),
                transition.significance,
                Some(transition.recommendation.to_string()),
            )
        }
        None => (Trend::Stable, Significance::Low, None),
    };

    TrendAnalysis {
        test_name: test_name.to_string(),
        current_result: Some((*current).clone()),
        previous_results: previous.iter().map(|r| (*r).clone()).collect(),
        trend,
        trend_details: TrendDetails {
            direction: direction_label(trend).to_string(),
            significance,
            recommendation,
        },
    }
}
