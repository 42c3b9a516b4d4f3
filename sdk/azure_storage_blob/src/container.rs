//! Container operations.

use crate::models::StorageResponseHeaders;
use crate::storage_operation;
use azure_rest_core::client::ServiceClient;
use azure_rest_core::error::{require_non_empty, AzureResult};
use azure_rest_core::response::ServiceResponse;
use reqwest::{Method, StatusCode};

/// Create a container.
///
/// Fails with a `ContainerAlreadyExists` service error (409) if it exists.
///
/// # Tracing
///
/// Emits a span named `azure::storage::container::create` with field `container`.
#[tracing::instrument(
    name = "azure::storage::container::create",
    skip(client),
    fields(container = %container)
)]
pub async fn create(
    client: &ServiceClient,
    container: &str,
) -> AzureResult<ServiceResponse<StorageResponseHeaders>> {
    require_non_empty("container", container)?;

    tracing::debug!("creating container");

    let op = storage_operation(client, Method::PUT, [container])
        .query("restype", "container")
        .expect(StatusCode::CREATED);

    let response = client.execute(op).await?;
    let headers = StorageResponseHeaders::from_headers(response.headers())?;
    Ok(response.into_response(headers))
}

/// Mark a container and the blobs in it for deletion.
///
/// # Tracing
///
/// Emits a span named `azure::storage::container::delete` with field `container`.
#[tracing::instrument(
    name = "azure::storage::container::delete",
    skip(client),
    fields(container = %container)
)]
pub async fn delete(
    client: &ServiceClient,
    container: &str,
) -> AzureResult<ServiceResponse<StorageResponseHeaders>> {
    require_non_empty("container", container)?;

    tracing::debug!("deleting container");

    let op = storage_operation(client, Method::DELETE, [container])
        .query("restype", "container")
        .expect(StatusCode::ACCEPTED);

    let response = client.execute(op).await?;
    let headers = StorageResponseHeaders::from_headers(response.headers())?;
    Ok(response.into_response(headers))
}
