//! Status of asynchronous gateway operations.
//!
//! Certificate uploads and deletes return a [`GatewayOperation`](crate::models::GatewayOperation)
//! whose ID can be polled here until the gateway finishes applying the change.

use crate::models::GatewayOperationDetails;
use crate::networking_operation;
use azure_rest_core::client::ServiceClient;
use azure_rest_core::error::{require_non_empty, AzureError, AzureResult};
use azure_rest_core::response::ServiceResponse;
use reqwest::{Method, StatusCode};
use std::time::Duration;

/// Get the current status of an asynchronous gateway operation.
///
/// # Tracing
///
/// Emits a span named `azure::network::operation::get_status` with field `operation_id`.
#[tracing::instrument(
    name = "azure::network::operation::get_status",
    skip(client),
    fields(operation_id = %operation_id)
)]
pub async fn get_status(
    client: &ServiceClient,
    operation_id: &str,
) -> AzureResult<ServiceResponse<GatewayOperationDetails>> {
    require_non_empty("operation_id", operation_id)?;

    tracing::debug!("fetching gateway operation status");

    let op = networking_operation(client, Method::GET, &["operation", operation_id])?
        .expect(StatusCode::OK);

    let response = client.execute(op).await?;
    let details: GatewayOperationDetails = response.xml("GatewayOperation")?;

    tracing::debug!(status = %details.status, "gateway operation status fetched");
    Ok(response.into_response(details))
}

/// Poll a gateway operation until it is no longer in progress.
///
/// Returns the final status, which may be `Failed`; the caller should inspect it.
/// With `max_attempts` set to `0` polling continues indefinitely.
///
/// # Example
///
/// ```rust,no_run
/// # use azure_rest_core::client::ServiceClient;
/// # use azure_mgmt_network::{client_root_certificate, operation};
/// # use azure_mgmt_network::models::ClientRootCertificateCreateParameters;
/// # use std::time::Duration;
/// # async fn example(client: &ServiceClient) -> azure_rest_core::error::AzureResult<()> {
/// let params = ClientRootCertificateCreateParameters::new("MIIC5zCCAc+gAwIBAgIQ...");
/// let accepted = client_root_certificate::create(client, "my-vnet", &params).await?;
/// if let Some(id) = &accepted.operation_id {
///     let done = operation::wait_for_completion(client, id, Duration::from_secs(5), 60).await?;
///     println!("{}", done.status);
/// }
/// # Ok(())
/// # }
/// ```
#[tracing::instrument(
    name = "azure::network::operation::wait_for_completion",
    skip(client),
    fields(operation_id = %operation_id)
)]
pub async fn wait_for_completion(
    client: &ServiceClient,
    operation_id: &str,
    poll_interval: Duration,
    max_attempts: u32,
) -> AzureResult<ServiceResponse<GatewayOperationDetails>> {
    tracing::debug!("starting to poll for completion");

    let mut attempts = 0u32;

    loop {
        if max_attempts > 0 {
            attempts += 1;
            if attempts > max_attempts {
                return Err(AzureError::OperationTimeout(format!(
                    "gateway operation {operation_id} still in progress after {max_attempts} attempts"
                )));
            }
        }

        let response = get_status(client, operation_id).await?;

        if response.status.is_terminal() {
            tracing::debug!(status = %response.status, "operation reached terminal status");
            return Ok(response);
        }

        tracing::trace!(attempt = attempts, "operation still in progress, waiting");
        tokio::time::sleep(poll_interval).await;
    }
}
