//! # Azure Websites Management
//!
//! Web site operations for the Azure service management API.
//!
//! ## Modules
//!
//! - [`web_site`] - Query web site usage metrics

use azure_rest_core::client::ServiceClient;
use azure_rest_core::error::AzureResult;
use azure_rest_core::operation::RestOperation;

pub mod models;
pub mod web_site;

/// Service management API version used unless the client overrides it.
pub const API_VERSION: &str = "2014-04-01";

/// Start an operation on `/{subscription}/services/webspaces/{webspace}/sites/{site}`.
pub(crate) fn site_operation(
    client: &ServiceClient,
    method: reqwest::Method,
    webspace_name: &str,
    web_site_name: &str,
) -> AzureResult<RestOperation> {
    let subscription_id = client.subscription_id()?;
    Ok(RestOperation::new(
        method,
        [
            subscription_id,
            "services",
            "webspaces",
            webspace_name.trim(),
            "sites",
            web_site_name.trim(),
        ],
    )
    .header("x-ms-version", client.api_version().unwrap_or(API_VERSION)))
}
