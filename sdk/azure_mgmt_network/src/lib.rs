//! # Azure Network Management
//!
//! Virtual network gateway operations for the Azure service management API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use azure_rest_core::auth::AzureCredential;
//! use azure_rest_core::client::ServiceClient;
//! use azure_mgmt_network::client_root_certificate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ServiceClient::builder()
//!         .endpoint("https://management.core.windows.net")
//!         .subscription_id("00000000-0000-0000-0000-000000000000")
//!         .credential(AzureCredential::from_env()?)
//!         .build()?;
//!
//!     let certificates = client_root_certificate::list(&client, "my-vnet").await?;
//!     for cert in &certificates.client_root_certificates {
//!         println!("{:?} {:?}", cert.subject, cert.thumbprint);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`client_root_certificate`] - Upload, retrieve, list, and delete gateway client root certificates
//! - [`operation`] - Track asynchronous gateway operations

use azure_rest_core::client::ServiceClient;
use azure_rest_core::error::AzureResult;
use azure_rest_core::operation::RestOperation;

pub mod client_root_certificate;
pub mod models;
pub mod operation;

/// Service management API version used unless the client overrides it.
pub const API_VERSION: &str = "2014-05-01";

/// Start an operation on `/{subscription}/services/networking/...`.
///
/// Identifier segments are trimmed.
pub(crate) fn networking_operation(
    client: &ServiceClient,
    method: reqwest::Method,
    segments: &[&str],
) -> AzureResult<RestOperation> {
    let subscription_id = client.subscription_id()?;
    let op = RestOperation::new(method, [subscription_id, "services", "networking"])
        .header("x-ms-version", client.api_version().unwrap_or(API_VERSION));
    Ok(segments.iter().fold(op, |op, s| op.segment(s.trim())))
}
