use super::enums::{Category, LabValueStatus, Priority, ResultStatus, TrendDirection};
use super::response::DoctorResponse;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single named measurement within a test result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LabValue {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub reference_range: String,
    pub status: LabValueStatus,
}

/// One completed diagnostic test.
///
/// `status` is recorded alongside the individual [`LabValue`]s and is not derived from them.
/// When `previous_result_id` is set it names an earlier result with the same `test_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TestResult {
    /// Blank ids are rejected on append; the REST surface mints one when omitted.
    #[serde(default)]
    pub id: String,
    pub date: NaiveDate,
    pub test_name: String,
    pub category: Category,
    pub subcategory: String,
    #[serde(default)]
    pub results: Vec<LabValue>,
    pub status: ResultStatus,
    /// Ordering clinician.
    pub doctor: String,
    pub facility: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub follow_up_required: bool,
    pub priority: Priority,
    pub ordered_by: String,
    pub completed_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_result_id: Option<String>,
    #[serde(default)]
    pub is_baseline: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_direction: Option<TrendDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_response: Option<DoctorResponse>,
}
