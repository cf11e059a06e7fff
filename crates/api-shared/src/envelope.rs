use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned by every failing API request: `{ "error": { "code", "message" } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Stable machine-readable code, e.g. `PATIENT_NOT_FOUND`.
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody::new("PATIENT_NOT_FOUND", "patient not found: p-1");
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["error"]["code"], "PATIENT_NOT_FOUND");
        assert_eq!(json["error"]["message"], "patient not found: p-1");
    }
}
