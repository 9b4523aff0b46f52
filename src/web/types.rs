//! Dashboard and REST API types

use serde::{Deserialize, Serialize};

/// Standard API response envelope
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success_with_message(message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: Some(message.to_string()),
            data: None,
        }
    }

    pub fn success_with_data(data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: None,
            data: Some(data),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.to_string()),
            data: None,
        }
    }

    pub fn error_with_data(message: &str, data: T) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.to_string()),
            data: Some(data),
        }
    }
}

/// Empty data type for responses without data
#[derive(Debug, Clone, Serialize)]
pub struct Empty {}

/// Query string carrying the selected index label, e.g. `?index=SENSEX`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexQuery {
    pub index: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_skips_empty_fields() {
        let ok = serde_json::to_value(ApiResponse::success_with_data(vec![1, 2])).unwrap();
        assert_eq!(ok, json!({"status": "success", "data": [1, 2]}));

        let err = serde_json::to_value(ApiResponse::<Empty>::error("boom")).unwrap();
        assert_eq!(err, json!({"status": "error", "message": "boom"}));
    }
}
