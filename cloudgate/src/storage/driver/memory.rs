//! In-process stand-ins for the object store and the table, answering with
//! the same client errors the real services return.

use std::collections::{BTreeMap, BTreeSet};

use tokio::sync::RwLock;

use crate::domain::item::{ID_ATTRIBUTE, Item};
use crate::error::StoreError;
use crate::storage::{ObjectStore, TableStore};
use crate::utils::validation::is_valid_bucket_name;

#[derive(Default)]
pub struct MemoryObjectStore {
    buckets: RwLock<BTreeSet<String>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn list_buckets(&self) -> Result<Vec<String>, StoreError> {
        let buckets = self.buckets.read().await;
        Ok(buckets.iter().cloned().collect())
    }

    async fn create_bucket(&self, name: &str) -> Result<(), StoreError> {
        if !is_valid_bucket_name(name) {
            return Err(StoreError::service(
                "CreateBucket",
                "InvalidBucketName",
                "The specified bucket is not valid.",
            ));
        }
        let mut buckets = self.buckets.write().await;
        if !buckets.insert(name.to_string()) {
            return Err(StoreError::service(
                "CreateBucket",
                "BucketAlreadyOwnedByYou",
                "Your previous request to create the named bucket succeeded and you already own it.",
            ));
        }
        Ok(())
    }

    async fn delete_bucket(&self, name: &str) -> Result<(), StoreError> {
        let mut buckets = self.buckets.write().await;
        if !buckets.remove(name) {
            return Err(StoreError::service(
                "DeleteBucket",
                "NoSuchBucket",
                "The specified bucket does not exist",
            ));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTable {
    items: RwLock<BTreeMap<String, Item>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }
}

fn validation_error(operation: &'static str, message: &str) -> StoreError {
    StoreError::service(operation, "ValidationException", message)
}

#[async_trait::async_trait]
impl TableStore for MemoryTable {
    async fn scan(&self) -> Result<Vec<Item>, StoreError> {
        let items = self.items.read().await;
        Ok(items.values().cloned().collect())
    }

    async fn put_item(&self, item: Item) -> Result<(), StoreError> {
        let Some(id) = item.get(ID_ATTRIBUTE) else {
            return Err(validation_error(
                "PutItem",
                "One or more parameter values were invalid: Missing the key id in the item",
            ));
        };
        let Some(id) = id.as_s() else {
            return Err(validation_error(
                "PutItem",
                "One or more parameter values were invalid: Type mismatch for key id expected: S",
            ));
        };
        if id.is_empty() {
            return Err(validation_error(
                "PutItem",
                "One or more parameter values are not valid. The AttributeValue for a key \
                 attribute cannot contain an empty string value. Key: id",
            ));
        }

        let id = id.to_string();
        self.items.write().await.insert(id, item);
        Ok(())
    }

    async fn delete_item(&self, id: &str) -> Result<(), StoreError> {
        if id.is_empty() {
            return Err(validation_error(
                "DeleteItem",
                "One or more parameter values are not valid. The AttributeValue for a key \
                 attribute cannot contain an empty string value. Key: id",
            ));
        }
        self.items.write().await.remove(id);
        Ok(())
    }
}
