use super::enums::{ResponsePriority, ResponseStatus, ResponseType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A clinician's written follow-up on a visit or a test result.
///
/// A response is owned by exactly one visit or one test result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DoctorResponse {
    pub id: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub response_date: NaiveDate,
    pub response_type: ResponseType,
    pub title: String,
    pub content: String,
    pub priority: ResponsePriority,
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub medication_changes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lifestyle_advice: Vec<String>,
}
