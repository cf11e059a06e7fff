//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. The intent is to avoid reading process-wide environment variables
//! during request handling, which can lead to inconsistent behaviour in multi-threaded runtimes
//! and test harnesses.

use crate::constants::{DEFAULT_DATE_BUCKETS, DEFAULT_OVERFLOW_BUCKET};
use crate::{RecordsError, RecordsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    patient_data_dir: PathBuf,
    date_buckets: DateBucketPolicy,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(patient_data_dir: PathBuf, date_buckets: DateBucketPolicy) -> Self {
        Self {
            patient_data_dir,
            date_buckets,
        }
    }

    pub fn patient_data_dir(&self) -> &Path {
        &self.patient_data_dir
    }

    pub fn date_buckets(&self) -> &DateBucketPolicy {
        &self.date_buckets
    }
}

/// One labelled date bucket; results at most `max_days` away fall into it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBucket {
    pub max_days: i64,
    pub label: String,
}

/// Policy mapping "days since today" onto named buckets for date grouping.
///
/// Buckets are checked in order and the first one whose `max_days` is greater than or equal to
/// the distance wins. Anything beyond the last bucket lands in the overflow label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBucketPolicy {
    buckets: Vec<DateBucket>,
    overflow_label: String,
}

impl DateBucketPolicy {
    /// Build a policy, validating that thresholds are non-negative and strictly increasing and
    /// that every label is non-empty.
    pub fn new(buckets: Vec<DateBucket>, overflow_label: impl Into<String>) -> RecordsResult<Self> {
        let overflow_label = overflow_label.into().trim().to_string();
        if overflow_label.is_empty() {
            return Err(RecordsError::InvalidInput(
                "date bucket overflow label cannot be empty".into(),
            ));
        }

        let mut previous: Option<i64> = None;
        for bucket in &buckets {
            if bucket.label.trim().is_empty() {
                return Err(RecordsError::InvalidInput(
                    "date bucket label cannot be empty".into(),
                ));
            }
            if bucket.max_days < 0 {
                return Err(RecordsError::InvalidInput(format!(
                    "date bucket '{}' has a negative threshold",
                    bucket.label
                )));
            }
            if previous.is_some_and(|p| bucket.max_days <= p) {
                return Err(RecordsError::InvalidInput(format!(
                    "date bucket '{}' threshold must be greater than the previous bucket",
                    bucket.label
                )));
            }
            previous = Some(bucket.max_days);
        }

        Ok(Self {
            buckets,
            overflow_label,
        })
    }

    pub fn buckets(&self) -> &[DateBucket] {
        &self.buckets
    }

    pub fn overflow_label(&self) -> &str {
        &self.overflow_label
    }

    /// Returns the label for a result `days` away from today.
    pub fn label_for(&self, days: i64) -> &str {
        self.buckets
            .iter()
            .find(|b| days <= b.max_days)
            .map(|b| b.label.as_str())
            .unwrap_or(&self.overflow_label)
    }
}

impl Default for DateBucketPolicy {
    fn default() -> Self {
        Self {
            buckets: DEFAULT_DATE_BUCKETS
                .iter()
                .map(|(max_days, label)| DateBucket {
                    max_days: *max_days,
                    label: (*label).to_string(),
                })
                .collect(),
            overflow_label: DEFAULT_OVERFLOW_BUCKET.to_string(),
        }
    }
}

/// Parse a date bucket policy from an optional string value.
///
/// The format is a comma-separated list of `max_days:label` pairs followed by a final bare
/// overflow label, e.g. `7:Last Week,30:Last Month,Older`.
///
/// If `value` is `None` or empty/whitespace, returns the default policy.
pub fn date_bucket_policy_from_env_value(value: Option<String>) -> RecordsResult<DateBucketPolicy> {
    let Some(value) = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
    else {
        return Ok(DateBucketPolicy::default());
    };

    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let Some((overflow, bucket_parts)) = parts.split_last() else {
        return Ok(DateBucketPolicy::default());
    };

    if overflow.contains(':') {
        return Err(RecordsError::InvalidInput(
            "date bucket policy must end with a bare overflow label".into(),
        ));
    }

    let buckets = bucket_parts
        .iter()
        .map(|part| {
            let (days, label) = part.split_once(':').ok_or_else(|| {
                RecordsError::InvalidInput(format!("date bucket '{part}' must be max_days:label"))
            })?;
            let max_days = days.trim().parse::<i64>().map_err(|_| {
                RecordsError::InvalidInput(format!("date bucket '{part}' has a non-numeric threshold"))
            })?;
            Ok(DateBucket {
                max_days,
                label: label.trim().to_string(),
            })
        })
        .collect::<RecordsResult<Vec<_>>>()?;

    DateBucketPolicy::new(buckets, *overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_uses_inclusive_upper_bounds() {
        let policy = DateBucketPolicy::default();
        assert_eq!(policy.label_for(0), "Last Week");
        assert_eq!(policy.label_for(7), "Last Week");
        assert_eq!(policy.label_for(8), "Last Month");
        assert_eq!(policy.label_for(30), "Last Month");
        assert_eq!(policy.label_for(90), "Last 3 Months");
        assert_eq!(policy.label_for(180), "Last 6 Months");
        assert_eq!(policy.label_for(365), "Last Year");
        assert_eq!(policy.label_for(366), "Older");
    }

    #[test]
    fn test_env_value_none_or_blank_gives_default() {
        assert_eq!(
            date_bucket_policy_from_env_value(None).expect("default policy"),
            DateBucketPolicy::default()
        );
        assert_eq!(
            date_bucket_policy_from_env_value(Some("   ".into())).expect("default policy"),
            DateBucketPolicy::default()
        );
    }

    #[test]
    fn test_env_value_parses_custom_buckets() {
        let policy =
            date_bucket_policy_from_env_value(Some("1:Today, 14:Fortnight ,Earlier".into()))
                .expect("policy should parse");

        assert_eq!(policy.buckets().len(), 2);
        assert_eq!(policy.label_for(1), "Today");
        assert_eq!(policy.label_for(10), "Fortnight");
        assert_eq!(policy.label_for(15), "Earlier");
        assert_eq!(policy.overflow_label(), "Earlier");
    }

    #[test]
    fn test_env_value_with_only_overflow_puts_everything_in_one_bucket() {
        let policy = date_bucket_policy_from_env_value(Some("All".into())).expect("policy");
        assert_eq!(policy.label_for(0), "All");
        assert_eq!(policy.label_for(10_000), "All");
    }

    #[test]
    fn test_env_value_rejects_non_increasing_thresholds() {
        let err = date_bucket_policy_from_env_value(Some("30:Month,7:Week,Older".into()))
            .expect_err("decreasing thresholds should fail");
        assert!(matches!(err, RecordsError::InvalidInput(_)));
    }

    #[test]
    fn test_env_value_rejects_missing_overflow_label() {
        let err = date_bucket_policy_from_env_value(Some("7:Week,30:Month".into()))
            .expect_err("trailing pair should fail");
        assert!(matches!(err, RecordsError::InvalidInput(_)));
    }

    #[test]
    fn test_env_value_rejects_bad_threshold() {
        let err = date_bucket_policy_from_env_value(Some("seven:Week,Older".into()))
            .expect_err("non-numeric threshold should fail");
        assert!(matches!(err, RecordsError::InvalidInput(_)));
    }

    #[test]
    fn test_new_rejects_negative_threshold_and_empty_labels() {
        let negative = DateBucketPolicy::new(
            vec![DateBucket {
                max_days: -1,
                label: "Future".into(),
            }],
            "Older",
        );
        assert!(negative.is_err());

        let empty_label = DateBucketPolicy::new(
            vec![DateBucket {
                max_days: 3,
                label: " ".into(),
            }],
            "Older",
        );
        assert!(empty_label.is_err());

        assert!(DateBucketPolicy::new(vec![], "").is_err());
    }
}
