//! Constants used throughout the medrec core crate.
//!
//! This module contains path, filename and policy constants to ensure
//! consistency across the codebase and make maintenance easier.

/// Default directory for patient data storage when no explicit directory is configured.
pub const DEFAULT_PATIENT_DATA_DIR: &str = "patient_data";

/// Filename for the per-patient records snapshot written by the file store.
pub const RECORDS_FILENAME: &str = "records.yaml";

/// Default date buckets as `(max_days, label)`; upper bounds are inclusive.
pub const DEFAULT_DATE_BUCKETS: [(i64, &str); 5] = [
    (7, "Last Week"),
    (30, "Last Month"),
    (90, "Last 3 Months"),
    (180, "Last 6 Months"),
    (365, "Last Year"),
];

/// Label for results older than the last configured bucket.
pub const DEFAULT_OVERFLOW_BUCKET: &str = "Older";

/// Prefix for the synthetic group key used when a result has no visit id.
pub const SYNTHETIC_VISIT_PREFIX: &str = "Visit";
