//! Validation of entries appended to a patient record.
//!
//! Both record stores run [`validate_append`] against the current snapshot before writing, so
//! a record only ever holds entries that passed these checks:
//!
//! - ids are unique per kind within the patient
//! - a result's `test_name` and a visit's `doctor_id` are not blank
//! - a `previous_result_id` naming a result in the record must point at an earlier result of
//!   the same test (references to results held elsewhere are accepted)
//! - results already in the record that name the new result as their previous result must be
//!   for the same test and dated strictly later
//! - a doctor response id is attached to at most one visit or test result
//!
//! A result's `visit_id` is not checked; visits may be recorded after their results.

use crate::models::{DoctorResponse, PatientRecord, RecordEntry, TestResult};
use crate::{RecordsError, RecordsResult};
use medrec_types::NonEmptyText;

/// Checks that `entry` can be appended to `record`.
///
/// # Errors
///
/// Returns:
/// - [`RecordsError::InvalidInput`] if the entry id or a required text field is blank,
/// - [`RecordsError::DuplicateId`] if an entry of the same kind already uses the id,
/// - [`RecordsError::InvalidPreviousResult`] if the previous-result link is inconsistent,
/// - [`RecordsError::ResponseOwnership`] if the attached response is already owned.
pub fn validate_append(record: &PatientRecord, entry: &RecordEntry) -> RecordsResult<()> {
    if entry.id().trim().is_empty() {
        return Err(RecordsError::InvalidInput(format!(
            "{} id cannot be empty",
            entry.kind()
        )));
    }

    match entry {
        RecordEntry::LabResult(result) => require_text("test_name", &result.test_name)?,
        RecordEntry::Visit(visit) => require_text("doctor_id", &visit.doctor_id)?,
    }

    let duplicate = match entry {
        RecordEntry::LabResult(result) => record.lab_results.iter().any(|r| r.id == result.id),
        RecordEntry::Visit(visit) => record.visits.iter().any(|v| v.id == visit.id),
    };
    if duplicate {
        return Err(RecordsError::DuplicateId {
            kind: entry.kind(),
            id: entry.id().to_string(),
        });
    }

    if let RecordEntry::LabResult(result) = entry {
        validate_previous_result(record, result)?;
        validate_following_results(record, result)?;
    }

    let response = match entry {
        RecordEntry::LabResult(result) => result.doctor_response.as_ref(),
        RecordEntry::Visit(visit) => visit.doctor_response.as_ref(),
    };
    if let Some(response) = response {
        validate_response_owner(record, response)?;
    }

    Ok(())
}

fn require_text(field: &str, value: &str) -> RecordsResult<()> {
    NonEmptyText::new(value)
        .map(|_| ())
        .map_err(|err| RecordsError::InvalidInput(format!("{field}: {err}")))
}

fn validate_previous_result(record: &PatientRecord, result: &TestResult) -> RecordsResult<()> {
    let Some(previous_id) = result.previous_result_id.as_deref() else {
        return Ok(());
    };

    let invalid = |reason| RecordsError::InvalidPreviousResult {
        id: result.id.clone(),
        previous_id: previous_id.to_string(),
        reason,
    };

    if previous_id == result.id {
        return Err(invalid("a result cannot precede itself"));
    }

    let Some(previous) = record.lab_results.iter().find(|r| r.id == previous_id) else {
        return Ok(());
    };

    if previous.test_name != result.test_name {
        return Err(invalid("previous result is for a different test"));
    }
    if previous.date >= result.date {
        return Err(invalid("previous result must be dated strictly earlier"));
    }

    Ok(())
}

/// Results can arrive out of order, so an earlier result may be appended after a later one
/// that already links to it.
fn validate_following_results(record: &PatientRecord, result: &TestResult) -> RecordsResult<()> {
    let following = record
        .lab_results
        .iter()
        .filter(|r| r.previous_result_id.as_deref() == Some(result.id.as_str()));

    for next in following {
        let invalid = |reason| RecordsError::InvalidPreviousResult {
            id: next.id.clone(),
            previous_id: result.id.clone(),
            reason,
        };
        if next.test_name != result.test_name {
            return Err(invalid("previous result is for a different test"));
        }
        if result.date >= next.date {
            return Err(invalid("previous result must be dated strictly earlier"));
        }
    }

    Ok(())
}

fn validate_response_owner(record: &PatientRecord, response: &DoctorResponse) -> RecordsResult<()> {
    let owned = record
        .owned_responses()
        .any(|existing| existing.id == response.id);

    if owned {
        return Err(RecordsError::ResponseOwnership(response.id.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResultStatus;
    use crate::test_support::{lab, record, response, visit};

    #[test]
    fn test_accepts_first_entry_of_each_kind() {
        let empty = PatientRecord::default();
        let result = lab("1", "Lipid Panel", "2025-03-15", ResultStatus::Normal);
        let v = visit("visit-1", "2025-03-15", "doc-1");

        validate_append(&empty, &RecordEntry::LabResult(result)).expect("result should be valid");
        validate_append(&empty, &RecordEntry::Visit(v)).expect("visit should be valid");
    }

    #[test]
    fn test_rejects_blank_id() {
        let result = lab("  ", "Lipid Panel", "2025-03-15", ResultStatus::Normal);
        let err = validate_append(&PatientRecord::default(), &RecordEntry::LabResult(result))
            .expect_err("blank id should fail");
        assert!(matches!(err, RecordsError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_duplicate_ids_per_kind() {
        let existing = record(
            vec![lab("1", "Lipid Panel", "2025-03-15", ResultStatus::Normal)],
            vec![visit("visit-1", "2025-03-15", "doc-1")],
        );

        let err = validate_append(
            &existing,
            &RecordEntry::LabResult(lab("1", "HbA1c", "2025-04-15", ResultStatus::Normal)),
        )
        .expect_err("duplicate result id should fail");
        assert!(matches!(err, RecordsError::DuplicateId { kind: "lab result", .. }));

        let err = validate_append(
            &existing,
            &RecordEntry::Visit(visit("visit-1", "2025-04-15", "doc-2")),
        )
        .expect_err("duplicate visit id should fail");
        assert!(matches!(err, RecordsError::DuplicateId { kind: "visit", .. }));

        // Ids are scoped per kind.
        validate_append(
            &existing,
            &RecordEntry::Visit(visit("1", "2025-04-15", "doc-2")),
        )
        .expect("visit may reuse a result id");
    }

    #[test]
    fn test_previous_result_must_be_earlier_and_same_test() {
        let existing = record(
            vec![lab("1", "Lipid Panel", "2025-03-15", ResultStatus::Abnormal)],
            vec![],
        );

        let mut follow_up = lab("2", "Lipid Panel", "2025-09-15", ResultStatus::Normal);
        follow_up.previous_result_id = Some("1".into());
        validate_append(&existing, &RecordEntry::LabResult(follow_up.clone()))
            .expect("earlier same-test link should be valid");

        let mut other_test = follow_up.clone();
        other_test.test_name = "HbA1c".into();
        let err = validate_append(&existing, &RecordEntry::LabResult(other_test))
            .expect_err("different test should fail");
        assert!(matches!(err, RecordsError::InvalidPreviousResult { .. }));

        let mut same_day = follow_up.clone();
        same_day.date = existing.lab_results[0].date;
        let err = validate_append(&existing, &RecordEntry::LabResult(same_day))
            .expect_err("same-day link should fail");
        assert!(matches!(err, RecordsError::InvalidPreviousResult { .. }));

        let mut self_link = follow_up;
        self_link.previous_result_id = Some("2".into());
        let err = validate_append(&existing, &RecordEntry::LabResult(self_link))
            .expect_err("self link should fail");
        assert!(matches!(err, RecordsError::InvalidPreviousResult { .. }));
    }

    #[test]
    fn test_rejects_blank_test_name_and_doctor_id() {
        let result = lab("1", " ", "2025-03-15", ResultStatus::Normal);
        let err = validate_append(&PatientRecord::default(), &RecordEntry::LabResult(result))
            .expect_err("blank test name should fail");
        assert!(matches!(err, RecordsError::InvalidInput(msg) if msg.starts_with("test_name")));

        let v = visit("visit-1", "2025-03-15", "");
        let err = validate_append(&PatientRecord::default(), &RecordEntry::Visit(v))
            .expect_err("blank doctor id should fail");
        assert!(matches!(err, RecordsError::InvalidInput(msg) if msg.starts_with("doctor_id")));
    }

    #[test]
    fn test_earlier_result_must_fit_existing_links_to_it() {
        let mut later = lab("B", "Lipid Panel", "2025-01-01", ResultStatus::Normal);
        later.previous_result_id = Some("A".into());
        let existing = record(vec![later], vec![]);

        let other_test = lab("A", "HbA1c", "2024-06-01", ResultStatus::Normal);
        let err = validate_append(&existing, &RecordEntry::LabResult(other_test))
            .expect_err("different test should fail");
        assert!(matches!(
            err,
            RecordsError::InvalidPreviousResult { id, previous_id, .. } if id == "B" && previous_id == "A"
        ));

        let dated_after = lab("A", "Lipid Panel", "2025-06-01", ResultStatus::Normal);
        let err = validate_append(&existing, &RecordEntry::LabResult(dated_after))
            .expect_err("result dated after its follower should fail");
        assert!(matches!(err, RecordsError::InvalidPreviousResult { .. }));

        let same_day = lab("A", "Lipid Panel", "2025-01-01", ResultStatus::Normal);
        validate_append(&existing, &RecordEntry::LabResult(same_day))
            .expect_err("same-day result should fail");

        let earlier = lab("A", "Lipid Panel", "2024-06-01", ResultStatus::Normal);
        validate_append(&existing, &RecordEntry::LabResult(earlier))
            .expect("earlier same-test result should be valid");
    }

    #[test]
    fn test_dangling_previous_result_is_accepted() {
        let mut result = lab("2", "Lipid Panel", "2025-09-15", ResultStatus::Normal);
        result.previous_result_id = Some("external-77".into());
        validate_append(&PatientRecord::default(), &RecordEntry::LabResult(result))
            .expect("dangling reference should be accepted");
    }

    #[test]
    fn test_response_can_only_have_one_owner() {
        let mut v = visit("visit-1", "2025-09-15", "doc-1");
        v.doctor_response = Some(response("resp-1", "2025-09-16"));
        let existing = record(vec![], vec![v]);

        let mut result = lab("1", "Lipid Panel", "2025-09-15", ResultStatus::Normal);
        result.doctor_response = Some(response("resp-1", "2025-09-17"));
        let err = validate_append(&existing, &RecordEntry::LabResult(result.clone()))
            .expect_err("shared response should fail");
        assert!(matches!(err, RecordsError::ResponseOwnership(id) if id == "resp-1"));

        result.doctor_response = Some(response("resp-2", "2025-09-17"));
        validate_append(&existing, &RecordEntry::LabResult(result))
            .expect("distinct response should be valid");
    }

    #[test]
    fn test_unknown_visit_link_is_accepted() {
        let mut result = lab("1", "Lipid Panel", "2025-09-15", ResultStatus::Normal);
        result.visit_id = Some("visit-later".into());
        validate_append(&PatientRecord::default(), &RecordEntry::LabResult(result))
            .expect("unknown visit should be accepted");
    }
}
