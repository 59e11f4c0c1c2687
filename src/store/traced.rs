/*---------- Imports ----------*/
use super::ItemStore;
use crate::{error::StoreError, models::media_item::MediaItem};
use std::time::Instant;
use tracing::{info, info_span, Instrument};

/// Interceptor that runs every store call inside a `store.put_item` span and
/// closes it with one `store.put_item` record carrying the table name, the
/// item id, the elapsed milliseconds and the outcome.
#[derive(Debug, Clone)]
pub struct TracedStore<S> {
    inner: S,
}

impl<S> TracedStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: ItemStore + Sync> ItemStore for TracedStore<S> {
    async fn put_item(&self, table_name: Option<&str>, item: &MediaItem) -> Result<(), StoreError> {
        let span = info_span!("store.put_item", table_name, item_id = %item.id);
        let started = Instant::now();

        let result = self
            .inner
            .put_item(table_name, item)
            .instrument(span.clone())
            .await;

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let outcome = if result.is_ok() { "ok" } else { "error" };

        span.in_scope(|| {
            info!(
                table_name,
                item_id = %item.id,
                elapsed_ms,
                outcome,
                "store.put_item"
            )
        });

        result
    }
}
