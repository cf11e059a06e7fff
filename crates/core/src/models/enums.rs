//! Closed vocabularies used by lab results, visits and doctor responses.
//!
//! Result-level status ([`ResultStatus`]) and value-level status ([`LabValueStatus`]) are two
//! distinct vocabularies and are never converted into one another.

use crate::RecordsError;
use serde::{Deserialize, Serialize};

/// Generates a closed string vocabulary with `as_str`, `Display` and `FromStr`.
macro_rules! vocabulary {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = RecordsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($s => Ok(Self::$variant)),+,
                    other => Err(RecordsError::InvalidInput(format!(
                        "unknown {} value: {other}",
                        stringify!($name)
                    ))),
                }
            }
        }
    };
}

vocabulary!(
    /// Broad test category.
    Category {
        Blood => "blood",
        Urine => "urine",
        Imaging => "imaging",
        Other => "other",
    }
);

vocabulary!(
    /// Overall status of a test result.
    ResultStatus {
        Normal => "normal",
        Abnormal => "abnormal",
        Critical => "critical",
    }
);

vocabulary!(
    /// Status of a single measured value inside a test result.
    LabValueStatus {
        Normal => "normal",
        Low => "low",
        High => "high",
        Critical => "critical",
    }
);

vocabulary!(
    /// Ordering priority of a test.
    Priority {
        Routine => "routine",
        Urgent => "urgent",
        Stat => "stat",
    }
);

vocabulary!(
    /// Direction of change between two readings.
    TrendDirection {
        Improving => "improving",
        Stable => "stable",
        Declining => "declining",
    }
);

vocabulary!(
    /// Outcome of a trend analysis, including the "no history" case.
    Trend {
        Improving => "improving",
        Stable => "stable",
        Declining => "declining",
        NoData => "no_data",
    }
);

vocabulary!(
    Significance {
        Low => "low",
        Moderate => "moderate",
        High => "high",
    }
);

vocabulary!(
    ResponseType {
        Review => "review",
        Recommendation => "recommendation",
        FollowUp => "follow_up",
        Consultation => "consultation",
    }
);

vocabulary!(
    ResponsePriority {
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
);

vocabulary!(
    ResponseStatus {
        Pending => "pending",
        Reviewed => "reviewed",
        ActionRequired => "action_required",
        Resolved => "resolved",
    }
);

vocabulary!(
    VisitType {
        Consultation => "consultation",
        FollowUp => "follow_up",
        Emergency => "emergency",
        RoutineCheckup => "routine_checkup",
    }
);

vocabulary!(
    VisitStatus {
        Completed => "completed",
        InProgress => "in_progress",
        Scheduled => "scheduled",
    }
);

vocabulary!(
    /// Key used to order results within a group.
    SortBy {
        Date => "date",
        Status => "status",
        TestName => "test_name",
        Priority => "priority",
    }
);

vocabulary!(
    SortOrder {
        Asc => "asc",
        Desc => "desc",
    }
);

impl From<TrendDirection> for Trend {
    fn from(direction: TrendDirection) -> Self {
        match direction {
            TrendDirection::Improving => Trend::Improving,
            TrendDirection::Stable => Trend::Stable,
            TrendDirection::Declining => Trend::Declining,
        }
    }
}

/// Dimension along which lab results are partitioned.
///
/// Parsing never fails: unrecognised values fall back to [`GroupBy::Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    #[default]
    Category,
    Subcategory,
    Date,
    Doctor,
    Facility,
    Status,
    Priority,
    Visit,
}

impl GroupBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Category => "category",
            GroupBy::Subcategory => "subcategory",
            GroupBy::Date => "date",
            GroupBy::Doctor => "doctor",
            GroupBy::Facility => "facility",
            GroupBy::Status => "status",
            GroupBy::Priority => "priority",
            GroupBy::Visit => "visit",
        }
    }

    /// Parse a grouping dimension, falling back to category for unknown input.
    pub fn from_param(value: &str) -> Self {
        match value.trim() {
            "category" => GroupBy::Category,
            "subcategory" => GroupBy::Subcategory,
            "date" => GroupBy::Date,
            "doctor" => GroupBy::Doctor,
            "facility" => GroupBy::Facility,
            "status" => GroupBy::Status,
            "priority" => GroupBy::Priority,
            "visit" => GroupBy::Visit,
            other => {
                tracing::warn!("unknown grouping dimension '{}', grouping by category", other);
                GroupBy::Category
            }
        }
    }
}

impl std::fmt::Display for GroupBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GroupBy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(GroupBy::from_param(&s))
    }
}
