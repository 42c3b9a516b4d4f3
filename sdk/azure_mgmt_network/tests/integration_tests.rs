//! Integration tests for azure_mgmt_network.
//!
//! These tests require a live service management endpoint and an existing
//! virtual network with a point-to-site gateway.
//! Run with: `cargo test --features integration-tests`
//!
//! Required environment variables:
//! - `AZURE_SUBSCRIPTION_ID`: The subscription that owns the network
//! - `AZURE_ACCESS_TOKEN`: A management bearer token (or sign in with the Azure CLI)
//! - `AZURE_NETWORK_NAME`: The virtual network to inspect
//!
//! Optional:
//! - `AZURE_SERVICE_ENDPOINT`: defaults to `https://management.core.windows.net`

#![cfg(feature = "integration-tests")]

use azure_mgmt_network::client_root_certificate;
use azure_rest_core::auth::AzureCredential;
use azure_rest_core::client::ServiceClient;

fn get_client() -> ServiceClient {
    let endpoint = std::env::var("AZURE_SERVICE_ENDPOINT")
        .unwrap_or_else(|_| "https://management.core.windows.net".to_string());

    ServiceClient::builder()
        .endpoint(endpoint)
        .credential(AzureCredential::from_env().expect("credential"))
        .build()
        .expect("Failed to build client")
}

fn get_network() -> String {
    std::env::var("AZURE_NETWORK_NAME").expect("AZURE_NETWORK_NAME not set")
}

#[tokio::test]
async fn test_list_client_root_certificates() {
    let client = get_client();
    let network = get_network();

    let response = client_root_certificate::list(&client, &network)
        .await
        .expect("list certificates");

    assert_eq!(response.status_code, 200);
    assert!(response.request_id.is_some());
    for cert in &response.client_root_certificates {
        assert!(cert.thumbprint.is_some());
    }
}

#[tokio::test]
async fn test_get_each_listed_certificate() {
    let client = get_client();
    let network = get_network();

    let listed = client_root_certificate::list(&client, &network)
        .await
        .expect("list certificates");

    for thumbprint in listed
        .client_root_certificates
        .iter()
        .filter_map(|c| c.thumbprint.as_deref())
    {
        let cert = client_root_certificate::get(&client, &network, thumbprint)
            .await
            .expect("get certificate");
        assert_eq!(cert.status_code, 200);
        assert!(!cert.value.is_empty());
    }
}
