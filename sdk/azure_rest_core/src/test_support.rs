//! Helpers for testing service crates against a [`wiremock`] server.

use crate::auth::AzureCredential;
use crate::client::ServiceClient;
use wiremock::MockServer;

/// Test bearer token (not a real token).
pub const TEST_TOKEN: &str = "test-token";

/// Subscription ID used by service management tests.
pub const TEST_SUBSCRIPTION_ID: &str = "sub-123";

/// Create a test client connected to a mock server.
///
/// The client authenticates with [`TEST_TOKEN`] and uses [`TEST_SUBSCRIPTION_ID`].
pub async fn setup_mock_client(server: &MockServer) -> ServiceClient {
    ServiceClient::builder()
        .endpoint(server.uri())
        .credential(AzureCredential::bearer(TEST_TOKEN))
        .subscription_id(TEST_SUBSCRIPTION_ID)
        .build()
        .expect("should build client")
}
