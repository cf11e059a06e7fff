//! Ordinal rankings shared by the sorter, the group rollup and the trend analyzer.

use crate::models::{Priority, ResultStatus};

/// Severity rank of a result status: critical(3) > abnormal(2) > normal(1).
pub fn status_rank(status: ResultStatus) -> u8 {
    match status {
        ResultStatus::Normal => 1,
        ResultStatus::Abnormal => 2,
        ResultStatus::Critical => 3,
    }
}

/// Urgency rank of a priority: stat(3) > urgent(2) > routine(1).
pub fn priority_rank(priority: Priority) -> u8 {
    match priority {
        Priority::Routine => 1,
        Priority::Urgent => 2,
        Priority::Stat => 3,
    }
}

/// The more severe of two statuses.
pub fn worst_status(a: ResultStatus, b: ResultStatus) -> ResultStatus {
    if status_rank(b) > status_rank(a) {
        b
    } else {
        a
    }
}
