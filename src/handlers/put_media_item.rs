/*---------- Imports ----------*/
use crate::{
    config::Config,
    error::IngestError,
    models::media_item::{MediaItem, MediaItemPayload},
    store::ItemStore,
    utils::http::{HttpResponse, SUCCESS_MESSAGE},
};
use lambda_http::{Body, Request, RequestExt, Response};
use tracing::info;

fn invocation_request_id(request: &Request) -> String {
    request
        .lambda_context_ref()
        .map(|context| context.request_id.to_owned())
        .unwrap_or_default()
}

fn payload_bytes(body: &Body) -> Option<&[u8]> {
    match body {
        Body::Empty => None,
        other => {
            let bytes: &[u8] = other.as_ref();
            Some(bytes).filter(|bytes| !bytes.is_empty())
        }
    }
}

/// Writes one media item per request and acknowledges it.
///
/// A non-empty body must be a JSON object with `year`, `title` and `id`; an
/// empty one stores the default item under a generated id. Every failure is
/// returned to the caller untouched, before or instead of the write.
pub async fn handler<S: ItemStore>(
    store: &S,
    config: &Config,
    request: Request,
) -> Result<Response<Body>, IngestError> {
    let request_id = invocation_request_id(&request);
    let request_id = request_id.as_str();
    let table_name = config.table_name();

    info!(table_name, request_id, "Processing request");

    match payload_bytes(request.body()) {
        Some(bytes) => {
            let payload = MediaItemPayload::parse(bytes)?;
            info!(item = %payload, request_id, "Received payload");

            let item = payload.into_item()?;
            store.put_item(table_name, &item).await?;
            info!(item_id = %item.id, request_id, "Data inserted successfully");
        }

        None => {
            info!(request_id, "Received request without payload");

            let item = MediaItem::with_generated_id();
            store.put_item(table_name, &item).await?;
            info!(item_id = %item.id, request_id, "Default data inserted");
        }
    }

    Ok(HttpResponse::build_success_response(SUCCESS_MESSAGE)?)
}
