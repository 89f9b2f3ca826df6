use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::{config::Credentials, Client};
use runtime::StoreConfig;
use tracing::info;

/// Build a DynamoDB client from the `store` config section.
///
/// Without a section (or without static keys) the SDK's default provider chain
/// resolves region and credentials.
pub async fn build_client(store: Option<&StoreConfig>) -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(store) = store {
        loader = loader.region(Region::new(store.region.clone()));
        if let Some(endpoint) = &store.endpoint {
            info!("Using table store endpoint {}", endpoint);
            loader = loader.endpoint_url(endpoint);
        }
        if let (Some(key_id), Some(secret)) = (&store.access_key_id, &store.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key_id,
                secret,
                None,
                None,
                "todo-server-config",
            ));
        }
    }

    let sdk_config = loader.load().await;
    Client::new(&sdk_config)
}
