/*---------- Imports ----------*/
use aws_config::BehaviorVersion;
use lambda_http::{service_fn, Error, IntoResponse, Request};
use media_ingest_api::{
    config::Config,
    handlers::put_media_item,
    store::{DynamoStore, ItemStore, TracedStore},
    utils::logging,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init()?;

    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let dynamodb_client = aws_sdk_dynamodb::Client::new(&config);
    let store = TracedStore::new(DynamoStore::new(dynamodb_client));
    let handler = service_fn(|request| handler_fn(&store, request));

    lambda_http::run(handler).await?;

    Ok(())
}

async fn handler_fn<S: ItemStore>(store: &S, request: Request) -> Result<impl IntoResponse, Error> {
    // Table name is read per invocation.
    let config = Config::from_env();

    Ok(put_media_item::handler(store, &config, request).await?)
}
