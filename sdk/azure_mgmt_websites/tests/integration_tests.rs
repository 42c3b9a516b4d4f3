//! Integration tests for azure_mgmt_websites.
//!
//! These tests require a live service management endpoint and an existing web site.
//! Run with: `cargo test --features integration-tests`
//!
//! Required environment variables:
//! - `AZURE_SUBSCRIPTION_ID`: The subscription that owns the site
//! - `AZURE_ACCESS_TOKEN`: A management bearer token (or sign in with the Azure CLI)
//! - `AZURE_WEBSPACE_NAME`: The webspace hosting the site (e.g. `westuswebspace`)
//! - `AZURE_WEB_SITE_NAME`: The web site to query

#![cfg(feature = "integration-tests")]

use azure_mgmt_websites::models::WebSiteGetHistoricalUsageMetricsParameters;
use azure_mgmt_websites::web_site;
use azure_rest_core::auth::AzureCredential;
use azure_rest_core::client::ServiceClient;
use chrono::{Duration, Utc};

fn get_client() -> ServiceClient {
    let endpoint = std::env::var("AZURE_SERVICE_ENDPOINT")
        .unwrap_or_else(|_| "https://management.core.windows.net".to_string());

    ServiceClient::builder()
        .endpoint(endpoint)
        .credential(AzureCredential::from_env().expect("credential"))
        .build()
        .expect("Failed to build client")
}

#[tokio::test]
async fn test_get_historical_usage_metrics() {
    let client = get_client();
    let webspace = std::env::var("AZURE_WEBSPACE_NAME").expect("AZURE_WEBSPACE_NAME not set");
    let site = std::env::var("AZURE_WEB_SITE_NAME").expect("AZURE_WEB_SITE_NAME not set");

    let end = Utc::now();
    let params = WebSiteGetHistoricalUsageMetricsParameters::builder()
        .metric_name("CpuTime")
        .start_time(end - Duration::hours(1))
        .end_time(end)
        .build()
        .expect("valid parameters");

    let response = web_site::get_historical_usage_metrics(&client, &webspace, &site, &params)
        .await
        .expect("get metrics");

    assert_eq!(response.status_code, 200);
    assert!(response.request_id.is_some());
}
