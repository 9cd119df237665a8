use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::envelope::{Envelope, Reply, success_envelope};
use crate::domain::item::parse_put_body;
use crate::error::AppError;
use crate::utils::state::AppState;

/// Documentation shape of a put-item body. Any other keys are accepted and
/// stored as strings.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({"id": "123", "name": "Test Item"}))]
pub struct PutItemRequest {
    /// Partition key of the item.
    pub id: String,
}

/// Get all DynamoDB items
#[utoipa::path(
    get,
    path = "/dynamodb/items",
    tag = "DynamoDB",
    responses(
        (status = 200, description = "Items of the table in typed attribute form, in `data`", body = Envelope),
        (status = 400, description = "DynamoDB rejected the scan", body = Envelope),
    )
)]
pub async fn scan_items(State(state): State<Arc<AppState>>) -> Result<Reply, AppError> {
    let items = state.table.scan().await?;
    Ok(success_envelope(Some(serde_json::to_value(items)?), None))
}

/// Add or update an item in DynamoDB
#[utoipa::path(
    post,
    path = "/dynamodb/items",
    tag = "DynamoDB",
    request_body(content = PutItemRequest, description = "JSON object with an `id` key", content_type = "application/json"),
    responses(
        (status = 200, description = "Item saved", body = Envelope),
        (status = 400, description = "Body missing, not an object, without `id`, or rejected by DynamoDB", body = Envelope),
        (status = 413, description = "Body larger than the request limit", body = Envelope),
    )
)]
pub async fn put_item(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Reply, AppError> {
    let item = parse_put_body(&body?)?;
    state.table.put_item(item).await?;
    Ok(success_envelope(None, Some("Item saved to DynamoDB".to_string())))
}

/// Delete DynamoDB item by id
#[utoipa::path(
    delete,
    path = "/dynamodb/items/{id}",
    tag = "DynamoDB",
    params(("id" = String, Path, description = "Value of the item's `id` key")),
    responses(
        (status = 200, description = "Item deleted, whether or not it existed", body = Envelope),
        (status = 400, description = "DynamoDB rejected the request", body = Envelope),
    )
)]
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Reply, AppError> {
    let Path(id) = id?;
    state.table.delete_item(&id).await?;
    Ok(success_envelope(
        None,
        Some(format!("Item with id={id} deleted")),
    ))
}
