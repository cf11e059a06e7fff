//! Record stores.
//!
//! A [`RecordStore`] owns every patient's lab results and visits. The engine only ever sees an
//! owned [`PatientRecord`] snapshot, so an append running on another thread is either fully
//! visible to a query or not at all.
//!
//! Two implementations are provided:
//!
//! - [`InMemoryRecordStore`]: a locked map, used by tests and for seeding demo data
//! - [`FileRecordStore`]: one YAML file per patient under the configured data directory
//!
//! Both run [`validate_append`](crate::validation::validate_append) before accepting an entry.

pub mod file;
pub mod memory;

use crate::models::{PatientRecord, RecordEntry};
use crate::RecordsResult;

pub use file::FileRecordStore;
pub use memory::InMemoryRecordStore;

/// Validated patient identifier; safe to use as a directory name.
pub type PatientId = medrec_types::Identifier;

pub trait RecordStore: Send + Sync {
    /// Owned, internally consistent copy of one patient's record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordsError::PatientNotFound`](crate::RecordsError::PatientNotFound) for an
    /// unknown patient, or a storage error if the record cannot be read.
    fn snapshot(&self, patient_id: &PatientId) -> RecordsResult<PatientRecord>;

    /// Append one entry, creating the patient record if it does not exist yet.
    fn append(&self, patient_id: &PatientId, entry: RecordEntry) -> RecordsResult<()>;

    /// Every patient with a record, sorted by id.
    fn list_patients(&self) -> RecordsResult<Vec<PatientId>>;
}
