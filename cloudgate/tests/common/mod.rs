#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use cloudgate::config::Config;
use cloudgate::domain::item::Item;
use cloudgate::error::StoreError;
use cloudgate::storage::{ObjectStore, TableStore};
use cloudgate::{AppState, create_router};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Object store double that answers from a fixed bucket list and records
/// every call it receives.
#[derive(Default)]
pub struct RecordingObjects {
    pub buckets: Vec<String>,
    pub fail_with: Option<StoreError>,
    pub calls: Mutex<Vec<String>>,
}

impl RecordingObjects {
    pub fn with_buckets(names: &[&str]) -> Self {
        Self {
            buckets: names.iter().map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn failing(err: StoreError) -> Self {
        Self {
            fail_with: Some(err),
            ..Default::default()
        }
    }

    fn record(&self, call: String) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ObjectStore for RecordingObjects {
    async fn list_buckets(&self) -> Result<Vec<String>, StoreError> {
        self.record("list".to_string())?;
        Ok(self.buckets.clone())
    }

    async fn create_bucket(&self, name: &str) -> Result<(), StoreError> {
        self.record(format!("create:{name}"))
    }

    async fn delete_bucket(&self, name: &str) -> Result<(), StoreError> {
        self.record(format!("delete:{name}"))
    }
}

/// Table double recording puts and deletes.
#[derive(Default)]
pub struct RecordingTable {
    pub scan_result: Vec<Item>,
    pub fail_with: Option<StoreError>,
    pub panic_on_scan: bool,
    pub puts: Mutex<Vec<Item>>,
    pub deletes: Mutex<Vec<String>>,
}

impl RecordingTable {
    pub fn failing(err: StoreError) -> Self {
        Self {
            fail_with: Some(err),
            ..Default::default()
        }
    }

    fn outcome(&self) -> Result<(), StoreError> {
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    pub fn puts(&self) -> Vec<Item> {
        self.puts.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TableStore for RecordingTable {
    async fn scan(&self) -> Result<Vec<Item>, StoreError> {
        if self.panic_on_scan {
            panic!("scan exploded");
        }
        self.outcome()?;
        Ok(self.scan_result.clone())
    }

    async fn put_item(&self, item: Item) -> Result<(), StoreError> {
        self.puts.lock().unwrap().push(item);
        self.outcome()
    }

    async fn delete_item(&self, id: &str) -> Result<(), StoreError> {
        self.deletes.lock().unwrap().push(id.to_string());
        self.outcome()
    }
}

pub fn router_with(objects: Arc<dyn ObjectStore>, table: Arc<dyn TableStore>) -> Router {
    create_router(Arc::new(AppState::with_stores(
        Config::default(),
        objects,
        table,
    )))
}

/// Sends one request through the router and decodes the JSON body
/// (`Value::Null` when the body is empty or not JSON).
pub async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Envelope shape of a failed call: `success` false, a non-empty `error`,
/// neither `data` nor `message`.
pub fn assert_failure_envelope(body: &Value) {
    assert_eq!(body["success"], Value::Bool(false), "body: {body}");
    assert!(
        body["error"].as_str().is_some_and(|e| !e.is_empty()),
        "body: {body}"
    );
    assert!(body.get("data").is_none(), "body: {body}");
    assert!(body.get("message").is_none(), "body: {body}");
}

pub fn assert_success_envelope(body: &Value) {
    assert_eq!(body["success"], Value::Bool(true), "body: {body}");
    assert!(body.get("error").is_none(), "body: {body}");
}
