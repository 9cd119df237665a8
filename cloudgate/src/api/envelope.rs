//! The JSON envelope every response of the gateway is wrapped in.
//!
//! Successful calls produce `{"success": true}` plus `data` and/or `message`;
//! failed calls produce `{"success": false, "error": "..."}` and nothing else.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Envelope {
    /// Whether the underlying operation completed.
    pub success: bool,

    /// Confirmation text for mutating operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Retrieved content (bucket names, items).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub data: Option<Value>,

    /// Provider or request error text, only on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn success(data: Option<Value>, message: Option<String>) -> Self {
        Self {
            success: true,
            message,
            data,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = UNKNOWN_ERROR.to_string();
        }
        Self {
            success: false,
            message: None,
            data: None,
            error: Some(error),
        }
    }
}

/// An envelope paired with the status code it is sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub envelope: Envelope,
}

impl Reply {
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

/// `{success: true, ...}` with status 200.
pub fn success_envelope(data: Option<Value>, message: Option<String>) -> Reply {
    Reply {
        status: StatusCode::OK,
        envelope: Envelope::success(data, message),
    }
}

/// `{success: false, error}` with status 400; use [`Reply::with_status`] for
/// anything else.
pub fn error_envelope(message: impl Into<String>) -> Reply {
    Reply {
        status: StatusCode::BAD_REQUEST,
        envelope: Envelope::failure(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_with_data_omits_message_and_error() {
        let reply = success_envelope(Some(json!([])), None);
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(
            serde_json::to_value(&reply.envelope).unwrap(),
            json!({"success": true, "data": []})
        );
    }

    #[test]
    fn success_with_message_omits_data() {
        let reply = success_envelope(None, Some("Bucket 'a' created".to_string()))
            .with_status(StatusCode::CREATED);
        assert_eq!(reply.status, StatusCode::CREATED);
        assert_eq!(
            serde_json::to_value(&reply.envelope).unwrap(),
            json!({"success": true, "message": "Bucket 'a' created"})
        );
    }

    #[test]
    fn failure_defaults_to_bad_request_and_carries_only_error() {
        let reply = error_envelope("boom");
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(&reply.envelope).unwrap(),
            json!({"success": false, "error": "boom"})
        );
    }

    #[test]
    fn failure_never_has_an_empty_error() {
        let envelope = Envelope::failure("  ");
        assert_eq!(envelope.error.as_deref(), Some(UNKNOWN_ERROR));
    }
}
