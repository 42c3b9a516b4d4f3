//! # Azure Compute Management
//!
//! Virtual machine image operations for the Azure service management API.
//!
//! ```rust,no_run
//! use azure_rest_core::client::ServiceClient;
//! use azure_mgmt_compute::virtual_machine_vm_image;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ServiceClient::builder()
//!     .endpoint("https://management.core.windows.net")
//!     .build()?;
//!
//! let images = virtual_machine_vm_image::list(&client).await?;
//! for image in &images.vm_images {
//!     println!("{:?} ({:?})", image.name, image.category);
//! }
//! # Ok(())
//! # }
//! ```

use azure_rest_core::client::ServiceClient;
use azure_rest_core::error::AzureResult;
use azure_rest_core::operation::RestOperation;

pub mod models;
pub mod virtual_machine_vm_image;

/// Service management API version used unless the client overrides it.
pub const API_VERSION: &str = "2014-06-01";

/// Start an operation on `/{subscription}/services/vmimages`.
pub(crate) fn vm_images_operation(
    client: &ServiceClient,
    method: reqwest::Method,
) -> AzureResult<RestOperation> {
    let subscription_id = client.subscription_id()?;
    Ok(
        RestOperation::new(method, [subscription_id, "services", "vmimages"])
            .header("x-ms-version", client.api_version().unwrap_or(API_VERSION)),
    )
}
