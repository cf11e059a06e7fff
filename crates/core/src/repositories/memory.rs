//! In-process record store.

use super::{PatientId, RecordStore};
use crate::models::{PatientRecord, RecordEntry};
use crate::validation::validate_append;
use crate::{RecordsError, RecordsResult};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<PatientId, PatientRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given records. Entries are taken as-is without validation.
    pub fn with_records(records: impl IntoIterator<Item = (PatientId, PatientRecord)>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().collect()),
        }
    }
}

impl RecordStore for InMemoryRecordStore {
    fn snapshot(&self, patient_id: &PatientId) -> RecordsResult<PatientRecord> {
        let records = self.records.read().map_err(|_| RecordsError::StoreUnavailable)?;
        records
            .get(patient_id)
            .cloned()
            .ok_or_else(|| RecordsError::PatientNotFound(patient_id.to_string()))
    }

    fn append(&self, patient_id: &PatientId, entry: RecordEntry) -> RecordsResult<()> {
        let mut records = self.records.write().map_err(|_| RecordsError::StoreUnavailable)?;
        match records.get(patient_id) {
            Some(record) => validate_append(record, &entry)?,
            None => validate_append(&PatientRecord::default(), &entry)?,
        }

        let record = records.entry(patient_id.clone()).or_default();
        match entry {
            RecordEntry::LabResult(result) => record.lab_results.push(result),
            RecordEntry::Visit(visit) => record.visits.push(visit),
        }
        Ok(())
    }

    fn list_patients(&self) -> RecordsResult<Vec<PatientId>> {
        let records = self.records.read().map_err(|_| RecordsError::StoreUnavailable)?;
        let mut ids: Vec<PatientId> = records.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
