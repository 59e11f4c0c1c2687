/*---------- Imports ----------*/
use thiserror::Error;

/// Failure reported by an [`ItemStore`](crate::store::ItemStore) write.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("put_item request failed: {0}")]
    Request(String),
}

/// Everything that can abort an ingest invocation.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("request body is not a valid JSON object: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("payload is missing required key `{0}`")]
    MissingField(&'static str),

    #[error("payload field `{field}` {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("couldn't build the response: {0}")]
    Response(#[from] lambda_http::http::Error),
}
