//! YAML-file record store.
//!
//! ## Storage Layout
//!
//! ```text
//! <patient_data_dir>/
//!   <patient_id>/
//!     records.yaml    # lab_results and visits for one patient
//! ```
//!
//! Appends rewrite `records.yaml` through a sibling temporary file followed by a rename, so a
//! reader sees either the previous file or the new one. Appends within one process are
//! serialised by a mutex; the store does not coordinate writers in separate processes.

use super::{PatientId, RecordStore};
use crate::config::CoreConfig;
use crate::constants::RECORDS_FILENAME;
use crate::models::{PatientRecord, RecordEntry};
use crate::validation::validate_append;
use crate::{RecordsError, RecordsResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug)]
pub struct FileRecordStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileRecordStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store rooted at the configured patient data directory.
    pub fn from_config(cfg: &CoreConfig) -> Self {
        Self::new(cfg.patient_data_dir())
    }

    fn records_path(&self, patient_id: &PatientId) -> PathBuf {
        self.root.join(patient_id.as_str()).join(RECORDS_FILENAME)
    }

    /// Reads a record file, returning `None` when it does not exist.
    fn read_record(&self, path: &Path) -> RecordsResult<Option<PatientRecord>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RecordsError::FileRead(e)),
        };
        parse_records_yaml(path, &contents).map(Some)
    }

    fn write_record(&self, patient_id: &PatientId, record: &PatientRecord) -> RecordsResult<()> {
        let path = self.records_path(patient_id);
        let dir = path
            .parent()
            .ok_or_else(|| RecordsError::InvalidInput("records path has no parent".into()))?;
        fs::create_dir_all(dir).map_err(RecordsError::StorageDirCreation)?;

        let yaml = serde_yaml::to_string(record).map_err(RecordsError::Serialization)?;
        let tmp = dir.join(format!(".{RECORDS_FILENAME}.tmp"));
        fs::write(&tmp, yaml).map_err(RecordsError::FileWrite)?;
        fs::rename(&tmp, &path).map_err(RecordsError::FileWrite)?;
        Ok(())
    }
}

/// Strictly parse a patient record, reporting the path of the first field that fails.
fn parse_records_yaml(file: &Path, yaml_text: &str) -> RecordsResult<PatientRecord> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

    match serde_path_to_error::deserialize(deserializer) {
        Ok(record) => Ok(record),
        Err(err) => {
            let path = err.path().to_string();
            let path = if path.is_empty() || path == "." {
                "<root>".to_string()
            } else {
                path
            };
            Err(RecordsError::Deserialization {
                file: file.to_path_buf(),
                path,
                message: err.into_inner().to_string(),
            })
        }
    }
}

impl RecordStore for FileRecordStore {
    fn snapshot(&self, patient_id: &PatientId) -> RecordsResult<PatientRecord> {
        self.read_record(&self.records_path(patient_id))?
            .ok_or_else(|| RecordsError::PatientNotFound(patient_id.to_string()))
    }

    fn append(&self, patient_id: &PatientId, entry: RecordEntry) -> RecordsResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RecordsError::StoreUnavailable)?;

        let mut record = self
            .read_record(&self.records_path(patient_id))?
            .unwrap_or_default();

        validate_append(&record, &entry)?;

        let kind = entry.kind();
        let id = entry.id().to_string();
        match entry {
            RecordEntry::LabResult(result) => record.lab_results.push(result),
            RecordEntry::Visit(visit) => record.visits.push(visit),
        }

        self.write_record(patient_id, &record)?;
        tracing::debug!(
            patient_id = %patient_id,
            kind,
            id = %id,
            path = %self.records_path(patient_id).display(),
            "wrote patient records file"
        );
        Ok(())
    }

    fn list_patients(&self) -> RecordsResult<Vec<PatientId>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RecordsError::FileRead(e)),
        };

        let mut ids = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                tracing::warn!(
                    path = %entry.path().display(),
                    "skipping non UTF-8 patient directory"
                );
                continue;
            };
            let Ok(id) = PatientId::new(name) else {
                tracing::warn!(name, "skipping directory with invalid patient id");
                continue;
            };
            if entry.path().join(RECORDS_FILENAME).is_file() {
                ids.push(id);
            } else {
                tracing::warn!(
                    patient_id = %id,
                    "skipping patient directory without records file"
                );
            }
        }

        ids.sort();
        Ok(ids)
    }
}
