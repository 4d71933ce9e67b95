//! Common test utilities
//!
//! Mock credentials match the ones the sandbox test account uses: the key
//! and passphrase are opaque strings, the secret base64-decodes to
//! "super-secret-password".

use gdax_rest::{ClientConfig, Credentials, GdaxRestClient};
use wiremock::MockServer;

pub const MOCK_KEY: &str = "YW1hemluZy1zdXBlci1zZWNyZXQta2V5";
pub const MOCK_PASSPHRASE: &str = "YW1hemluZy1zdXBlci1wYXNzcGhyYXNl";
pub const MOCK_SECRET: &str = "c3VwZXItc2VjcmV0LXBhc3N3b3Jk";

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// A fully credentialed client pointed at the mock server
pub fn mock_client(server: &MockServer) -> GdaxRestClient {
    let credentials = Credentials::new(MOCK_KEY, MOCK_PASSPHRASE, MOCK_SECRET);
    GdaxRestClient::with_config(ClientConfig::new(credentials).with_base_url(server.uri()))
}

/// An unauthenticated client pointed at the mock server
pub fn public_client(server: &MockServer) -> GdaxRestClient {
    GdaxRestClient::with_config(ClientConfig::new(Credentials::public()).with_base_url(server.uri()))
}

pub const TIME_RESPONSE: &str =
    r#"{ "iso": "2015-01-07T23:47:25.201Z", "epoch": 1420674445.201 }"#;
