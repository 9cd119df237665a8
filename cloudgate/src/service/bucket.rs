use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::Value;

use crate::api::envelope::{Envelope, Reply, success_envelope};
use crate::error::AppError;
use crate::utils::state::AppState;

/// Get all S3 buckets
#[utoipa::path(
    get,
    path = "/s3/buckets",
    tag = "S3",
    responses(
        (status = 200, description = "List of bucket names in `data`", body = Envelope),
        (status = 400, description = "S3 rejected the request", body = Envelope),
    )
)]
pub async fn list_buckets(State(state): State<Arc<AppState>>) -> Result<Reply, AppError> {
    let names = state.objects.list_buckets().await?;
    Ok(success_envelope(Some(Value::from(names)), None))
}

/// Create a new S3 bucket
#[utoipa::path(
    post,
    path = "/s3/buckets/{bucket_name}",
    tag = "S3",
    params(("bucket_name" = String, Path, description = "Name of the bucket to create")),
    responses(
        (status = 201, description = "Bucket created", body = Envelope),
        (status = 400, description = "Invalid or already taken name, region mismatch", body = Envelope),
    )
)]
pub async fn create_bucket(
    State(state): State<Arc<AppState>>,
    bucket_name: Result<Path<String>, PathRejection>,
) -> Result<Reply, AppError> {
    let Path(bucket_name) = bucket_name?;
    create(&state, &bucket_name).await
}

/// Delete an S3 bucket
#[utoipa::path(
    delete,
    path = "/s3/buckets/{bucket_name}",
    tag = "S3",
    params(("bucket_name" = String, Path, description = "Name of the bucket to delete")),
    responses(
        (status = 200, description = "Bucket deleted", body = Envelope),
        (status = 400, description = "Bucket missing or not empty", body = Envelope),
    )
)]
pub async fn delete_bucket(
    State(state): State<Arc<AppState>>,
    bucket_name: Result<Path<String>, PathRejection>,
) -> Result<Reply, AppError> {
    let Path(bucket_name) = bucket_name?;
    delete(&state, &bucket_name).await
}

// `/s3/buckets/` carries an empty name; the store rejects it like any other bad name.
pub async fn create_unnamed_bucket(State(state): State<Arc<AppState>>) -> Result<Reply, AppError> {
    create(&state, "").await
}

pub async fn delete_unnamed_bucket(State(state): State<Arc<AppState>>) -> Result<Reply, AppError> {
    delete(&state, "").await
}

async fn create(state: &AppState, bucket_name: &str) -> Result<Reply, AppError> {
    state.objects.create_bucket(bucket_name).await?;
    tracing::info!(bucket = bucket_name, region = %state.config.region, "bucket created");
    Ok(
        success_envelope(None, Some(format!("Bucket '{bucket_name}' created")))
            .with_status(StatusCode::CREATED),
    )
}

async fn delete(state: &AppState, bucket_name: &str) -> Result<Reply, AppError> {
    state.objects.delete_bucket(bucket_name).await?;
    tracing::info!(bucket = bucket_name, "bucket deleted");
    Ok(success_envelope(
        None,
        Some(format!("Bucket '{bucket_name}' deleted")),
    ))
}
