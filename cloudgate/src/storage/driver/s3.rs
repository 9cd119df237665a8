use aws_config::SdkConfig;
use aws_sdk_s3::Client;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};

use crate::config::{Config, DEFAULT_REGION};
use crate::error::StoreError;
use crate::storage::ObjectStore;
use crate::storage::driver::classify;

pub struct S3ObjectStore {
    client: Client,
    region: String,
}

impl S3ObjectStore {
    pub fn new(sdk_config: &SdkConfig, config: &Config) -> Self {
        let mut builder = aws_sdk_s3::config::Builder::from(sdk_config);
        // S3-compatible endpoints (MinIO, LocalStack) do not resolve virtual-hosted buckets.
        if config.endpoint_url.is_some() {
            builder = builder.force_path_style(true);
        }
        Self::from_client(Client::from_conf(builder.build()), &config.region)
    }

    pub fn from_client(client: Client, region: &str) -> Self {
        Self {
            client,
            region: region.to_string(),
        }
    }

    fn bucket_configuration(&self) -> Option<CreateBucketConfiguration> {
        if self.region == DEFAULT_REGION {
            return None;
        }
        Some(
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                .build(),
        )
    }
}

/// The SDK refuses to build a request without a bucket; report it the way
/// the provider reports any other bad name.
fn require_bucket_name(operation: &'static str, name: &str) -> Result<(), StoreError> {
    if name.is_empty() {
        return Err(StoreError::service(
            operation,
            "InvalidBucketName",
            "The specified bucket is not valid.",
        ));
    }
    Ok(())
}

#[async_trait::async_trait]
impl ObjectStore for S3ObjectStore {
    async fn list_buckets(&self) -> Result<Vec<String>, StoreError> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| classify("ListBuckets", e))?;
        Ok(output
            .buckets()
            .iter()
            .filter_map(|bucket| bucket.name().map(str::to_string))
            .collect())
    }

    async fn create_bucket(&self, name: &str) -> Result<(), StoreError> {
        require_bucket_name("CreateBucket", name)?;
        self.client
            .create_bucket()
            .bucket(name)
            .set_create_bucket_configuration(self.bucket_configuration())
            .send()
            .await
            .map_err(|e| classify("CreateBucket", e))?;
        Ok(())
    }

    async fn delete_bucket(&self, name: &str) -> Result<(), StoreError> {
        require_bucket_name("DeleteBucket", name)?;
        self.client
            .delete_bucket()
            .bucket(name)
            .send()
            .await
            .map_err(|e| classify("DeleteBucket", e))?;
        Ok(())
    }
}
