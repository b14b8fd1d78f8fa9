//! Shared fixtures for the integration tests
//!
//! Every test points both the login host and the Graph host at one
//! `MockServer`, so token requests land on `/tenant-id/oauth2/v2.0/token`
//! and resource requests on `/v1.0/...`.

#![allow(dead_code)]

use serde_json::json;
use sharepoint_sdk::{SharePointClient, SharePointConfig};
use wiremock::{
    matchers::{body_string_contains, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const TOKEN_PATH: &str = "/tenant-id/oauth2/v2.0/token";
pub const DOMAIN: &str = "contoso.sharepoint.com";
pub const CREATED: &str = "2024-01-15T10:30:00Z";
pub const MODIFIED: &str = "2024-03-02T08:00:00Z";

pub fn config(server: &MockServer) -> SharePointConfig {
    SharePointConfig::new("client-id", "tenant-id", "secret", DOMAIN)
        .with_graph_base_url(server.uri())
        .with_login_base_url(server.uri())
}

/// Token endpoint mock issuing `token`; callers add `.expect()` or `.up_to_n_times()`
pub fn token_mock(token: &str, expires_in: i64) -> Mock {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "expires_in": expires_in,
            "ext_expires_in": expires_in,
            "access_token": token
        })))
}

/// Client with a token endpoint that always issues `tok-1`
pub async fn client(server: &MockServer) -> SharePointClient {
    token_mock("tok-1", 3599).mount(server).await;
    SharePointClient::new(config(server)).unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
