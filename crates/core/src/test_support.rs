//! Fixture builders for unit tests.

use crate::models::{
    Category, DoctorResponse, PatientRecord, Priority, ResponsePriority, ResponseStatus,
    ResponseType, ResultStatus, TestResult, Visit, VisitStatus, VisitType,
};
use chrono::NaiveDate;

pub(crate) fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("fixture dates are valid")
}

pub(crate) fn lab(id: &str, test_name: &str, on: &str, status: ResultStatus) -> TestResult {
    TestResult {
        id: id.to_string(),
        date: date(on),
        test_name: test_name.to_string(),
        category: Category::Blood,
        subcategory: "Chemistry".to_string(),
        results: Vec::new(),
        status,
        doctor: "Dr. Sarah Johnson".to_string(),
        facility: "Central Lab".to_string(),
        notes: None,
        follow_up_required: false,
        priority: Priority::Routine,
        ordered_by: "Dr. Sarah Johnson".to_string(),
        completed_by: "Lab Tech - Mary Smith".to_string(),
        visit_id: None,
        visit_date: None,
        previous_result_id: None,
        is_baseline: false,
        trend_direction: None,
        doctor_response: None,
    }
}

pub(crate) fn visit(id: &str, on: &str, doctor_id: &str) -> Visit {
    Visit {
        id: id.to_string(),
        date: date(on),
        doctor_id: doctor_id.to_string(),
        doctor_name: format!("Dr. {doctor_id}"),
        visit_type: VisitType::Consultation,
        reason: "Routine checkup and lab review".to_string(),
        diagnosis: None,
        notes: String::new(),
        status: VisitStatus::Completed,
        follow_up_required: false,
        follow_up_date: None,
        doctor_response: None,
    }
}

pub(crate) fn response(id: &str, on: &str) -> DoctorResponse {
    DoctorResponse {
        id: id.to_string(),
        doctor_id: "doc-1".to_string(),
        doctor_name: "Dr. Sarah Johnson".to_string(),
        response_date: date(on),
        response_type: ResponseType::Review,
        title: format!("Review {id}"),
        content: "Reviewed.".to_string(),
        priority: ResponsePriority::Low,
        status: ResponseStatus::Reviewed,
        attachments: Vec::new(),
        recommendations: Vec::new(),
        follow_up_date: None,
        medication_changes: Vec::new(),
        lifestyle_advice: Vec::new(),
    }
}

pub(crate) fn record(lab_results: Vec<TestResult>, visits: Vec<Visit>) -> PatientRecord {
    PatientRecord {
        lab_results,
        visits,
    }
}
