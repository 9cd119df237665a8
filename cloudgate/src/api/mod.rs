pub mod docs;
pub mod envelope;

use std::any::Any;
use std::sync::Arc;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, LOCATION};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api::docs::{ApiDoc, DOCS_PATH, SPEC_PATH};
use crate::api::envelope::error_envelope;
use crate::error::{AppError, INTERNAL_ERROR_MESSAGE};
use crate::service::bucket::{
    create_bucket, create_unnamed_bucket, delete_bucket, delete_unnamed_bucket, list_buckets,
};
use crate::service::item::{delete_item, put_item, scan_items};
use crate::utils::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(redirect_to_docs))
        .nest("/s3", s3_router())
        .nest("/dynamodb", dynamodb_router())
        .merge(docs_router())
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn s3_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/buckets", get(list_buckets))
        .route(
            "/buckets/",
            post(create_unnamed_bucket).delete(delete_unnamed_bucket),
        )
        .route(
            "/buckets/{bucket_name}",
            post(create_bucket).delete(delete_bucket),
        )
}

fn dynamodb_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/items", get(scan_items).post(put_item))
        .route("/items/{id}", delete(delete_item))
}

fn docs_router() -> Router<Arc<AppState>> {
    // Built once, served as static JSON.
    let doc = Arc::new(ApiDoc::openapi());
    Router::new()
        .route(
            SPEC_PATH,
            get(move || async move {
                ([(CACHE_CONTROL, "no-store")], Json(doc.as_ref())).into_response()
            }),
        )
        .route(DOCS_PATH, get(docs::serve_docs))
}

async fn redirect_to_docs() -> impl IntoResponse {
    (StatusCode::FOUND, [(LOCATION, DOCS_PATH)])
}

async fn not_found(request: Request) -> AppError {
    AppError::NotFound(request.uri().path().to_string())
}

async fn method_not_allowed(request: Request) -> AppError {
    AppError::MethodNotAllowed(request.method().to_string())
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!("handler panicked: {}", detail);
    error_envelope(INTERNAL_ERROR_MESSAGE)
        .with_status(StatusCode::INTERNAL_SERVER_ERROR)
        .into_response()
}
