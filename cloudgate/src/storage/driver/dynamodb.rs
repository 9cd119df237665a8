use std::collections::HashMap;

use aws_config::SdkConfig;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;

use crate::config::Config;
use crate::domain::item::{AttrValue, ID_ATTRIBUTE, Item};
use crate::error::StoreError;
use crate::storage::TableStore;
use crate::storage::driver::classify;

pub struct DynamoDbTable {
    client: Client,
    table_name: String,
}

impl DynamoDbTable {
    pub fn new(sdk_config: &SdkConfig, config: &Config) -> Self {
        let conf = aws_sdk_dynamodb::config::Builder::from(sdk_config).build();
        let client = Client::from_conf(conf);
        Self::from_client(client, &config.table_name)
    }

    pub fn from_client(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl TableStore for DynamoDbTable {
    async fn scan(&self) -> Result<Vec<Item>, StoreError> {
        // No LastEvaluatedKey follow-up: tables beyond one page come back truncated.
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| classify("Scan", e))?;
        let truncated = output
            .last_evaluated_key()
            .is_some_and(|key| !key.is_empty());
        if truncated {
            tracing::warn!(table = %self.table_name, "scan returned a partial result");
        }
        Ok(output.items().iter().map(from_sdk_item).collect())
    }

    async fn put_item(&self, item: Item) -> Result<(), StoreError> {
        let item = item
            .into_iter()
            .map(|(name, value)| Ok((name, to_sdk(value)?)))
            .collect::<Result<HashMap<_, _>, StoreError>>()?;
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| classify("PutItem", e))?;
        Ok(())
    }

    async fn delete_item(&self, id: &str) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(ID_ATTRIBUTE, AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| classify("DeleteItem", e))?;
        Ok(())
    }
}

fn from_sdk_item(item: &HashMap<String, AttributeValue>) -> Item {
    item.iter()
        .map(|(name, value)| (name.clone(), from_sdk(value)))
        .collect()
}

fn from_sdk(value: &AttributeValue) -> AttrValue {
    match value {
        AttributeValue::S(s) => AttrValue::S(s.clone()),
        AttributeValue::N(n) => AttrValue::N(n.clone()),
        AttributeValue::B(blob) => AttrValue::B(B64.encode(blob.as_ref())),
        AttributeValue::Bool(b) => AttrValue::Bool(*b),
        AttributeValue::Null(n) => AttrValue::Null(*n),
        AttributeValue::L(values) => AttrValue::L(values.iter().map(from_sdk).collect()),
        AttributeValue::M(fields) => AttrValue::M(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), from_sdk(value)))
                .collect(),
        ),
        AttributeValue::Ss(values) => AttrValue::SS(values.clone()),
        AttributeValue::Ns(values) => AttrValue::NS(values.clone()),
        AttributeValue::Bs(blobs) => {
            AttrValue::BS(blobs.iter().map(|blob| B64.encode(blob.as_ref())).collect())
        }
        other => {
            tracing::warn!("unsupported attribute type in scan result: {:?}", other);
            AttrValue::Null(true)
        }
    }
}

// Put bodies only yield `S`. The other arms let any scanned item go back
// through `TableStore::put_item` unchanged.
fn to_sdk(value: AttrValue) -> Result<AttributeValue, StoreError> {
    Ok(match value {
        AttrValue::S(s) => AttributeValue::S(s),
        AttrValue::N(n) => AttributeValue::N(n),
        AttrValue::B(encoded) => AttributeValue::B(decode_blob(&encoded)?),
        AttrValue::Bool(b) => AttributeValue::Bool(b),
        AttrValue::Null(n) => AttributeValue::Null(n),
        AttrValue::L(values) => {
            AttributeValue::L(values.into_iter().map(to_sdk).collect::<Result<_, _>>()?)
        }
        AttrValue::M(fields) => AttributeValue::M(
            fields
                .into_iter()
                .map(|(name, value)| Ok((name, to_sdk(value)?)))
                .collect::<Result<_, StoreError>>()?,
        ),
        AttrValue::SS(values) => AttributeValue::Ss(values),
        AttrValue::NS(values) => AttributeValue::Ns(values),
        AttrValue::BS(values) => AttributeValue::Bs(
            values
                .iter()
                .map(|encoded| decode_blob(encoded))
                .collect::<Result<_, _>>()?,
        ),
    })
}

fn decode_blob(encoded: &str) -> Result<Blob, StoreError> {
    B64.decode(encoded).map(Blob::new).map_err(|e| {
        StoreError::service(
            "PutItem",
            "ValidationException",
            format!("Binary attribute is not valid base64: {e}"),
        )
    })
}
