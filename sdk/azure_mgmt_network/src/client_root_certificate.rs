//! Client root certificate operations for virtual network gateways.
//!
//! Point-to-site VPN clients authenticate with certificates issued by a root
//! certificate uploaded to the gateway. Uploads and deletes are asynchronous:
//! the service answers with an operation ID that can be tracked with
//! [`crate::operation::get_status`].

use crate::models::{ClientRootCertificateCreateParameters, ClientRootCertificateList, GatewayOperation};
use crate::networking_operation;
use azure_rest_core::client::ServiceClient;
use azure_rest_core::error::{require_non_empty, AzureResult};
use azure_rest_core::response::ServiceResponse;
use reqwest::{Method, StatusCode};

const GATEWAY_OPERATION_ROOT: &str = "GatewayOperationAsyncResponse";

/// Upload a client root certificate to a virtual network gateway.
///
/// # Example
///
/// ```rust,no_run
/// # use azure_rest_core::client::ServiceClient;
/// # use azure_mgmt_network::client_root_certificate;
/// # use azure_mgmt_network::models::ClientRootCertificateCreateParameters;
/// # async fn example(client: &ServiceClient) -> azure_rest_core::error::AzureResult<()> {
/// let params = ClientRootCertificateCreateParameters::new("MIIC5zCCAc+gAwIBAgIQ...");
/// let response = client_root_certificate::create(client, "my-vnet", &params).await?;
/// println!("operation: {:?}", response.operation_id);
/// # Ok(())
/// # }
/// ```
///
/// # Tracing
///
/// Emits a span named `azure::network::client_root_certificate::create` with field `network_name`.
#[tracing::instrument(
    name = "azure::network::client_root_certificate::create",
    skip(client, parameters),
    fields(network_name = %network_name)
)]
pub async fn create(
    client: &ServiceClient,
    network_name: &str,
    parameters: &ClientRootCertificateCreateParameters,
) -> AzureResult<ServiceResponse<GatewayOperation>> {
    require_non_empty("network_name", network_name)?;
    require_non_empty("certificate", &parameters.certificate)?;

    tracing::debug!("uploading client root certificate");

    let op = networking_operation(
        client,
        Method::POST,
        &[network_name, "gateway", "clientrootcertificates"],
    )?
    .xml_body(parameters.certificate.as_str())
    .expect(StatusCode::ACCEPTED);

    let response = client.execute(op).await?;
    let operation = response.xml(GATEWAY_OPERATION_ROOT)?;

    tracing::debug!(operation_id = ?operation_id(&operation), "certificate upload accepted");
    Ok(response.into_response(operation))
}

/// Delete a client root certificate from a virtual network gateway.
///
/// # Tracing
///
/// Emits a span named `azure::network::client_root_certificate::delete` with
/// fields `network_name` and `thumbprint`.
#[tracing::instrument(
    name = "azure::network::client_root_certificate::delete",
    skip(client),
    fields(network_name = %network_name, thumbprint = %thumbprint)
)]
pub async fn delete(
    client: &ServiceClient,
    network_name: &str,
    thumbprint: &str,
) -> AzureResult<ServiceResponse<GatewayOperation>> {
    require_non_empty("network_name", network_name)?;
    require_non_empty("thumbprint", thumbprint)?;

    tracing::debug!("deleting client root certificate");

    let op = networking_operation(
        client,
        Method::DELETE,
        &[network_name, "gateway", "clientrootcertificates", thumbprint],
    )?
    .expect(StatusCode::OK);

    let response = client.execute(op).await?;
    let operation = response.xml(GATEWAY_OPERATION_ROOT)?;

    tracing::debug!(operation_id = ?operation_id(&operation), "certificate delete accepted");
    Ok(response.into_response(operation))
}

/// Get the public data of a client root certificate.
///
/// The service returns the certificate itself as the response body.
///
/// # Tracing
///
/// Emits a span named `azure::network::client_root_certificate::get` with
/// fields `network_name` and `thumbprint`.
#[tracing::instrument(
    name = "azure::network::client_root_certificate::get",
    skip(client),
    fields(network_name = %network_name, thumbprint = %thumbprint)
)]
pub async fn get(
    client: &ServiceClient,
    network_name: &str,
    thumbprint: &str,
) -> AzureResult<ServiceResponse<String>> {
    require_non_empty("network_name", network_name)?;
    require_non_empty("thumbprint", thumbprint)?;

    tracing::debug!("fetching client root certificate");

    let op = networking_operation(
        client,
        Method::GET,
        &[network_name, "gateway", "clientrootcertificates", thumbprint],
    )?
    .expect(StatusCode::OK);

    let response = client.execute(op).await?;
    let certificate = response.text()?;
    Ok(response.into_response(certificate))
}

/// List the client root certificates installed on a virtual network gateway.
///
/// # Example
///
/// ```rust,no_run
/// # use azure_rest_core::client::ServiceClient;
/// # use azure_mgmt_network::client_root_certificate;
/// # async fn example(client: &ServiceClient) -> azure_rest_core::error::AzureResult<()> {
/// let response = client_root_certificate::list(client, "my-vnet").await?;
/// println!("{} certificates (request {:?})", response.client_root_certificates.len(), response.request_id);
/// # Ok(())
/// # }
/// ```
///
/// # Tracing
///
/// Emits a span named `azure::network::client_root_certificate::list` with field `network_name`.
#[tracing::instrument(
    name = "azure::network::client_root_certificate::list",
    skip(client),
    fields(network_name = %network_name)
)]
pub async fn list(
    client: &ServiceClient,
    network_name: &str,
) -> AzureResult<ServiceResponse<ClientRootCertificateList>> {
    require_non_empty("network_name", network_name)?;

    tracing::debug!("listing client root certificates");

    let op = networking_operation(
        client,
        Method::GET,
        &[network_name, "gateway", "clientrootcertificates"],
    )?
    .expect(StatusCode::OK);

    let response = client.execute(op).await?;
    let list: ClientRootCertificateList = response.xml("ClientRootCertificates")?;

    tracing::debug!(count = list.client_root_certificates.len(), "certificates listed");
    Ok(response.into_response(list))
}

fn operation_id(operation: &GatewayOperation) -> Option<&str> {
    operation.operation_id.as_deref()
}
