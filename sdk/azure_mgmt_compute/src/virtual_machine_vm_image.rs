//! Virtual machine image operations (`/services/vmimages`).

use crate::models::VirtualMachineVMImageList;
use crate::vm_images_operation;
use azure_rest_core::client::ServiceClient;
use azure_rest_core::error::{require_non_empty, AzureResult};
use azure_rest_core::response::ServiceResponse;
use reqwest::{Method, StatusCode};

/// List the VM images available to the subscription.
///
/// # Tracing
///
/// Emits a span named `azure::compute::virtual_machine_vm_image::list`.
#[tracing::instrument(name = "azure::compute::virtual_machine_vm_image::list", skip(client))]
pub async fn list(client: &ServiceClient) -> AzureResult<ServiceResponse<VirtualMachineVMImageList>> {
    tracing::debug!("listing vm images");

    let op = vm_images_operation(client, Method::GET)?.expect(StatusCode::OK);

    let response = client.execute(op).await?;
    let images: VirtualMachineVMImageList = response.xml("VMImages")?;

    tracing::debug!(count = images.vm_images.len(), "vm images listed");
    Ok(response.into_response(images))
}

/// Delete a captured VM image.
///
/// When `delete_from_storage` is `true` the underlying VHD blobs are deleted
/// too; otherwise only the image registration is removed.
///
/// # Tracing
///
/// Emits a span named `azure::compute::virtual_machine_vm_image::delete` with field `vm_image_name`.
#[tracing::instrument(
    name = "azure::compute::virtual_machine_vm_image::delete",
    skip(client),
    fields(vm_image_name = %vm_image_name)
)]
pub async fn delete(
    client: &ServiceClient,
    vm_image_name: &str,
    delete_from_storage: bool,
) -> AzureResult<ServiceResponse<()>> {
    require_non_empty("vm_image_name", vm_image_name)?;

    tracing::debug!(delete_from_storage, "deleting vm image");

    let mut op = vm_images_operation(client, Method::DELETE)?
        .segment(vm_image_name.trim())
        .expect(StatusCode::ACCEPTED);
    if delete_from_storage {
        op = op.query("comp", "media");
    }

    let response = client.execute(op).await?;
    Ok(response.into_response(()))
}
