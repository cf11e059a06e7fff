use super::lab::TestResult;
use super::response::DoctorResponse;
use super::visit::Visit;
use serde::{Deserialize, Serialize};

/// Snapshot of everything the engine reads for one patient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(deny_unknown_fields)]
pub struct PatientRecord {
    #[serde(default)]
    pub lab_results: Vec<TestResult>,
    #[serde(default)]
    pub visits: Vec<Visit>,
}

impl PatientRecord {
    /// Responses attached to visits, then those attached to test results, in snapshot order.
    pub fn owned_responses(&self) -> impl Iterator<Item = &DoctorResponse> {
        self.visits
            .iter()
            .filter_map(|v| v.doctor_response.as_ref())
            .chain(
                self.lab_results
                    .iter()
                    .filter_map(|r| r.doctor_response.as_ref()),
            )
    }
}

/// A new entity appended to a patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "entry", rename_all = "snake_case")]
pub enum RecordEntry {
    LabResult(TestResult),
    Visit(Visit),
}

impl RecordEntry {
    pub fn id(&self) -> &str {
        match self {
            RecordEntry::LabResult(r) => &r.id,
            RecordEntry::Visit(v) => &v.id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RecordEntry::LabResult(_) => "lab result",
            RecordEntry::Visit(_) => "visit",
        }
    }
}
