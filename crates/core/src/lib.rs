//! # Medrec Core
//!
//! Core business logic for the medrec lab results engine.
//!
//! This crate contains the patient record model, record stores and the aggregation engine:
//! - Lab results, visits and doctor responses as closed, typed vocabularies
//! - Record stores: in-memory and one YAML file per patient under `PATIENT_DATA_DIR`
//! - Grouped views, trend analysis, visit summaries and response correlation over a snapshot
//!
//! **No API concerns**: HTTP servers, authentication and CLI parsing belong in `api-rest`,
//! `api-shared` and `medrec-cli`.

pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod labs;
pub mod models;
pub mod repositories;
pub mod service;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{date_bucket_policy_from_env_value, CoreConfig, DateBucket, DateBucketPolicy};
pub use error::{RecordsError, RecordsResult};
pub use labs::{StatusCounts, TrendAnalysis, TrendDetails, TrendTally, VisitSummary};
pub use repositories::{FileRecordStore, InMemoryRecordStore, PatientId, RecordStore};
pub use service::LabResultsService;
