//! A JSON REST gateway over S3 buckets and one DynamoDB table.
//!
//! Every route performs exactly one provider call and answers with an
//! [`api::envelope::Envelope`]; failures of any kind, including unknown
//! routes and handler panics, use the same shape.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod storage;
pub mod utils;

pub use api::create_router;
pub use utils::state::AppState;
