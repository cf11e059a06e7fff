//! Domain model for patient lab results, visits and clinician responses.

pub mod enums;
pub mod group;
pub mod lab;
pub mod record;
pub mod response;
pub mod visit;

pub use enums::{
    Category, GroupBy, LabValueStatus, Priority, ResponsePriority, ResponseStatus, ResponseType,
    ResultStatus, Significance, SortBy, SortOrder, Trend, TrendDirection, VisitStatus, VisitType,
};
pub use group::{DateRange, GroupingOptions, LabFilters, LabGroup};
pub use lab::{LabValue, TestResult};
pub use record::{PatientRecord, RecordEntry};
pub use response::DoctorResponse;
pub use visit::{Visit, VisitDetail};
