/*---------- Imports ----------*/
use crate::{error::StoreError, models::media_item::MediaItem};
use std::future::Future;

pub mod dynamo;
pub mod traced;

pub use dynamo::DynamoStore;
pub use traced::TracedStore;

/// Destination for ingested media items.
///
/// `put_item` is an unconditional upsert: an existing item with the same `id`
/// is replaced. Implementations never read back or retry.
pub trait ItemStore {
    fn put_item(
        &self,
        table_name: Option<&str>,
        item: &MediaItem,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
