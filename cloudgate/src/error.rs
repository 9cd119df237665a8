use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::envelope::error_envelope;
use crate::domain::item::ItemError;

/// Message returned to callers for every failure we did not anticipate.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Outcome of a failed call into the object store or the table service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The provider answered and reported the request as invalid
    /// (bad name, missing resource, permission denied, ...).
    #[error("An error occurred ({code}) when calling the {operation} operation: {message}")]
    Service {
        code: String,
        operation: &'static str,
        message: String,
    },

    /// The request never got a provider answer: credentials, DNS, timeouts,
    /// malformed responses.
    #[error("{operation} failed: {detail}")]
    Transport {
        operation: &'static str,
        detail: String,
    },
}

impl StoreError {
    pub fn service(
        operation: &'static str,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Service {
            code: code.into(),
            operation,
            message: message.into(),
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Service { .. })
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    InvalidItem(#[from] ItemError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{}", .0.body_text())]
    Path(#[from] PathRejection),

    #[error("{}", .0.body_text())]
    Body(#[from] BytesRejection),

    #[error("The requested URL {0} was not found on the server")]
    NotFound(String),

    #[error("The method {0} is not allowed for the requested URL")]
    MethodNotAllowed(String),

    #[error("serde_json error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidItem(_) => StatusCode::BAD_REQUEST,
            Self::Store(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Path(rejection) => rejection.status(),
            Self::Body(rejection) => rejection.status(),
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Store(_) | Self::Serialization(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Generating response for AppError: {:?}", self);
            return error_envelope(INTERNAL_ERROR_MESSAGE)
                .with_status(status)
                .into_response();
        }

        tracing::warn!(%status, "request rejected: {}", self);
        error_envelope(self.to_string())
            .with_status(status)
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_reads_like_the_provider_text() {
        let err = StoreError::service(
            "DeleteBucket",
            "NoSuchBucket",
            "The specified bucket does not exist",
        );
        assert_eq!(
            err.to_string(),
            "An error occurred (NoSuchBucket) when calling the DeleteBucket operation: \
             The specified bucket does not exist"
        );
    }

    #[test]
    fn provider_client_errors_collapse_to_bad_request() {
        let err: AppError =
            StoreError::service("CreateBucket", "BucketAlreadyExists", "taken").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: AppError = ItemError::MissingId.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn transport_failures_are_internal() {
        let err: AppError = StoreError::Transport {
            operation: "Scan",
            detail: "dispatch failure".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn framework_errors_keep_their_status() {
        assert_eq!(
            AppError::NotFound("/nope".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::MethodNotAllowed("PUT".to_string()).status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
