//! Wire envelopes for callers that exchange JSON with the core

use crate::errors::AssessmentError;
use serde::{Deserialize, Serialize};

/// Successful response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<&AssessmentError> for ErrorResponse {
    fn from(err: &AssessmentError) -> Self {
        Self {
            error: ErrorDetail {
                code: err.code().to_string(),
                message: err.user_message(),
                field: err.field().map(str::to_string),
            },
        }
    }
}

/// Serialize a result as either `{"data": ...}` or `{"error": {...}}`
pub fn to_envelope<T: Serialize>(result: Result<T, AssessmentError>) -> String {
    let encoded = match &result {
        Ok(data) => serde_json::to_string(&DataResponse { data }),
        Err(err) => serde_json::to_string(&ErrorResponse::from(err)),
    };
    encoded.unwrap_or_else(|e| {
        format!(
            r#"{{"error":{{"code":"SERIALIZATION_ERROR","message":{:?}}}}}"#,
            e.to_string()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_envelope() {
        let json = to_envelope::<u32>(Ok(80));
        assert_eq!(json, r#"{"data":80}"#);
    }

    #[test]
    fn test_error_envelope_carries_field() {
        let json = to_envelope::<u32>(Err(AssessmentError::invalid("height", "is required")));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["error"]["code"], "INVALID_INPUT");
        assert_eq!(value["error"]["field"], "height");
        assert_eq!(value["error"]["message"], "Height: is required");
    }

    #[test]
    fn test_error_envelope_omits_missing_field() {
        let json = to_envelope::<u32>(Err(AssessmentError::MissingProfile));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["error"]["code"], "MISSING_PROFILE");
        assert!(value["error"].get("field").is_none());
    }
}
