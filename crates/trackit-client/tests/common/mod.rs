/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for trackit-client tests

use trackit_client::{ClientConfig, TokenData, TrackitClient, User};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Mock bearer token for testing
pub fn mock_token() -> String {
    "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.test.signature".to_string()
}

#[allow(dead_code)]
pub fn test_user() -> User {
    User {
        id: "64f0c0ffee".to_string(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
    }
}

/// Client pointed at the mock server, already holding a bearer token
#[allow(dead_code)]
pub fn signed_in_client(server: &MockServer) -> TrackitClient {
    let client = TrackitClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
        .expect("client init");
    client
        .token_store()
        .set(TokenData::new(mock_token(), test_user()));
    client
}
