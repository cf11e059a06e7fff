use super::enums::{VisitStatus, VisitType};
use super::lab::TestResult;
use super::response::DoctorResponse;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One clinical encounter.
///
/// Test results reference their visit through `TestResult::visit_id`; the visit does not
/// contain them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Visit {
    /// Blank ids are rejected on append; the REST surface mints one when omitted.
    #[serde(default)]
    pub id: String,
    pub date: NaiveDate,
    pub doctor_id: String,
    pub doctor_name: String,
    pub visit_type: VisitType,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub status: VisitStatus,
    #[serde(default)]
    pub follow_up_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_response: Option<DoctorResponse>,
}

/// A visit joined with the test results that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VisitDetail {
    pub visit: Visit,
    pub lab_results: Vec<TestResult>,
}
