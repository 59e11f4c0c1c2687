/*---------- Imports ----------*/
use super::ItemStore;
use crate::{error::StoreError, models::media_item::MediaItem};
use aws_sdk_dynamodb::error::DisplayErrorContext;

/// [`ItemStore`] backed by a DynamoDB table.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: aws_sdk_dynamodb::Client,
}

impl DynamoStore {
    pub fn new(client: aws_sdk_dynamodb::Client) -> Self {
        Self { client }
    }
}

impl ItemStore for DynamoStore {
    async fn put_item(&self, table_name: Option<&str>, item: &MediaItem) -> Result<(), StoreError> {
        // An unconfigured table is forwarded unset and rejected as a client error.
        self.client
            .put_item()
            .set_table_name(table_name.map(str::to_owned))
            .set_item(Some(item.to_attributes()))
            .send()
            .await
            .map_err(|error| StoreError::Request(DisplayErrorContext(error).to_string()))?;

        Ok(())
    }
}
