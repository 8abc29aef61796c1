//! Content feed binary
//!
//! Loads a feed over HTTP through a generated `CONTENT` manager.
//!
//! Configuration:
//! - `CONTENT_FEED_URL`: feed locator (absolute, or relative to `FETCH_BASE_URL`)
//! - `FETCH_BASE_URL`, `FETCH_TIMEOUT_SECS`, `FETCH_USER_AGENT`: transport settings
//! - `RUST_LOG`: log filter

use content_feed::{FeedStore, RESOURCE_NAME, RESULTS_PROP_NAME};
use fetch_lifecycle_core::{ActionTypeRegistry, ManagerDescriptor, Value};
use fetch_lifecycle_transport::{TransportConfig, install_default};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FEED_URL: &str = "https://jsonplaceholder.typicode.com/posts?_limit=3";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "content_feed=debug,fetch_lifecycle_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = TransportConfig::from_env()?;
    install_default(&config)?;

    let manager = ManagerDescriptor::new(RESOURCE_NAME)
        .results_prop_name(RESULTS_PROP_NAME)
        .build()?;

    let mut registry = ActionTypeRegistry::new();
    registry.register(&manager);
    tracing::info!(action_types = ?registry.iter().collect::<Vec<_>>(), "Registered action types");

    let url = std::env::var("CONTENT_FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string());

    let mut store = FeedStore::new(manager);
    store.load(&url).await;

    match store.slice().error() {
        Some(error) => tracing::error!(%error, "Feed failed to load"),
        None => tracing::info!(posts = store.posts().len(), "Feed loaded"),
    }

    for post in store.posts() {
        let title = post.get("title").and_then(Value::as_str).unwrap_or("<untitled>");
        tracing::info!(title, "Post");
    }

    Ok(())
}
