use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use crate::error::StoreError;

pub mod dynamodb;
pub mod memory;
pub mod s3;

/// Sorts an SDK failure into a provider-reported client error or a
/// transport failure.
pub(crate) fn classify<E, R>(operation: &'static str, err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err.as_service_error() {
        Some(service) => {
            let error = StoreError::service(
                operation,
                service.code().unwrap_or("Unknown"),
                service.message().unwrap_or("Unknown"),
            );
            tracing::debug!(operation, "provider rejected request: {}", error);
            error
        }
        None => StoreError::Transport {
            operation,
            detail: DisplayErrorContext(&err).to_string(),
        },
    }
}
