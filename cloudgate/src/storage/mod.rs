use crate::domain::item::Item;
use crate::error::StoreError;

pub mod driver;

/// Bucket operations of the object store.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Names of all buckets, in the order the provider lists them.
    async fn list_buckets(&self) -> Result<Vec<String>, StoreError>;
    async fn create_bucket(&self, name: &str) -> Result<(), StoreError>;
    async fn delete_bucket(&self, name: &str) -> Result<(), StoreError>;
}

/// Item operations on the one table the gateway is configured with.
#[async_trait::async_trait]
pub trait TableStore: Send + Sync {
    /// A single scan request; only the first page the provider returns.
    async fn scan(&self) -> Result<Vec<Item>, StoreError>;
    /// Full replace of the item with the same `id`.
    async fn put_item(&self, item: Item) -> Result<(), StoreError>;
    /// No existence check: deleting a missing id succeeds.
    async fn delete_item(&self, id: &str) -> Result<(), StoreError>;
}
