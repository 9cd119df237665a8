use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};

use crate::config::{Backend, Config};
use crate::storage::driver::dynamodb::DynamoDbTable;
use crate::storage::driver::memory::{MemoryObjectStore, MemoryTable};
use crate::storage::driver::s3::S3ObjectStore;
use crate::storage::{ObjectStore, TableStore};

/// Everything a handler needs; built once at startup and shared.
#[derive(Clone)]
pub struct AppState {
    pub objects: Arc<dyn ObjectStore>,
    pub table: Arc<dyn TableStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> Self {
        let objects: Arc<dyn ObjectStore>;
        let table: Arc<dyn TableStore>;
        match config.backend {
            Backend::Aws => {
                let region = Region::new(config.region.clone());
                let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
                if let Some(endpoint_url) = &config.endpoint_url {
                    loader = loader.endpoint_url(endpoint_url);
                }
                let sdk_config = loader.load().await;
                objects = Arc::new(S3ObjectStore::new(&sdk_config, &config));
                table = Arc::new(DynamoDbTable::new(&sdk_config, &config));
            }
            Backend::Memory => {
                objects = Arc::new(MemoryObjectStore::new());
                table = Arc::new(MemoryTable::new());
            }
        }

        Self::with_stores(config, objects, table)
    }

    pub fn with_stores(
        config: Config,
        objects: Arc<dyn ObjectStore>,
        table: Arc<dyn TableStore>,
    ) -> Self {
        AppState {
            objects,
            table,
            config: Arc::new(config),
        }
    }
}
