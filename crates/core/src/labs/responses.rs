//! Correlation of doctor responses attached to visits and test results.

use crate::models::{DoctorResponse, PatientRecord};
use std::collections::HashSet;

/// Every response reachable from a visit or a test result, newest first.
///
/// A response id is reported once even if more than one record carries it. Responses on the
/// same date keep visit-then-result snapshot order.
pub fn collect_responses(record: &PatientRecord) -> Vec<DoctorResponse> {
    let mut seen = HashSet::new();
    let mut responses: Vec<DoctorResponse> = record
        .owned_responses()
        .filter(|response| seen.insert(response.id.clone()))
        .cloned()
        .collect();

    responses.sort_by(|a, b| b.response_date.cmp(&a.response_date));
    responses
}

pub fn find_response(record: &PatientRecord, response_id: &str) -> Option<DoctorResponse> {
    record
        .owned_responses()
        .find(|response| response.id == response_id)
        .cloned()
}
