use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RecordsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("patient not found: {0}")]
    PatientNotFound(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to read patient records file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write patient records file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialize YAML: {0}")]
    Serialization(serde_yaml::Error),
    #[error("failed to serialize JSON: {0}")]
    JsonSerialization(serde_json::Error),
    #[error(
        "patient records schema mismatch in {file} at {path}: {message}",
        file = file.display()
    )]
    Deserialization {
        file: PathBuf,
        path: String,
        message: String,
    },
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
    #[error("result {id} has invalid previous result {previous_id}: {reason}")]
    InvalidPreviousResult {
        id: String,
        previous_id: String,
        reason: &'static str,
    },
    #[error("doctor response {0} is already attached to another record")]
    ResponseOwnership(String),
    #[error("record store lock poisoned")]
    StoreUnavailable,
}

impl From<medrec_types::TextError> for RecordsError {
    fn from(err: medrec_types::TextError) -> Self {
        RecordsError::InvalidInput(err.to_string())
    }
}

pub type RecordsResult<T> = std::result::Result<T, RecordsError>;
