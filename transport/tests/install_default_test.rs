//! Installing the default transport behind the shared fetcher.
//!
//! Installation is process-wide, so it is exercised by a single test.

#![allow(clippy::unwrap_used)]

use fetch_lifecycle_core::{FetchOptions, ManagerDescriptor};
use fetch_lifecycle_transport::{TransportConfig, TransportConfigError, install_default};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_install_default_serves_bundles_built_before_it() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/content"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["post"])))
        .expect(1)
        .mount(&server)
        .await;

    let content = ManagerDescriptor::new("CONTENT").build().unwrap();
    let config = TransportConfig::default().base_url(server.uri());

    install_default(&config).unwrap();
    assert!(matches!(
        install_default(&config),
        Err(TransportConfigError::AlreadyInstalled)
    ));

    let body = content.fetch().fetch(FetchOptions::new("/content")).await.unwrap();
    assert_eq!(body, json!(["post"]));
}
