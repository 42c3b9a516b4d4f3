//! Web site operations.

use crate::models::{WebSiteGetHistoricalUsageMetricsParameters, WebSiteGetHistoricalUsageMetricsResult};
use crate::site_operation;
use azure_rest_core::client::ServiceClient;
use azure_rest_core::error::{require_non_empty, AzureResult};
use azure_rest_core::response::ServiceResponse;
use azure_rest_core::time::format_iso8601;
use reqwest::{Method, StatusCode};

/// Get historical usage metrics for a web site.
///
/// # Example
///
/// ```rust,no_run
/// # use azure_rest_core::client::ServiceClient;
/// # use azure_mgmt_websites::models::WebSiteGetHistoricalUsageMetricsParameters;
/// # use azure_mgmt_websites::web_site;
/// # async fn example(client: &ServiceClient) -> azure_rest_core::error::AzureResult<()> {
/// let params = WebSiteGetHistoricalUsageMetricsParameters::builder()
///     .metric_name("CpuTime")
///     .build()?;
///
/// let metrics = web_site::get_historical_usage_metrics(client, "westuswebspace", "mysite", &params).await?;
/// for metric in &metrics.usage_metrics {
///     println!("{:?}", metric.data.as_ref().and_then(|d| d.name.as_deref()));
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Tracing
///
/// Emits a span named `azure::websites::web_site::get_historical_usage_metrics`
/// with fields `webspace_name` and `web_site_name`.
#[tracing::instrument(
    name = "azure::websites::web_site::get_historical_usage_metrics",
    skip(client, parameters),
    fields(webspace_name = %webspace_name, web_site_name = %web_site_name)
)]
pub async fn get_historical_usage_metrics(
    client: &ServiceClient,
    webspace_name: &str,
    web_site_name: &str,
    parameters: &WebSiteGetHistoricalUsageMetricsParameters,
) -> AzureResult<ServiceResponse<WebSiteGetHistoricalUsageMetricsResult>> {
    require_non_empty("webspace_name", webspace_name)?;
    require_non_empty("web_site_name", web_site_name)?;

    tracing::debug!(metrics = ?parameters.metric_names, "fetching historical usage metrics");

    let names = (!parameters.metric_names.is_empty()).then(|| parameters.metric_names.join(","));
    let op = site_operation(client, Method::GET, webspace_name, web_site_name)?
        .segment("metrics")
        .query_opt("names", names)
        .query_opt("StartTime", parameters.start_time.as_ref().map(format_iso8601))
        .query_opt("EndTime", parameters.end_time.as_ref().map(format_iso8601))
        .expect(StatusCode::OK);

    let response = client.execute(op).await?;
    let result: WebSiteGetHistoricalUsageMetricsResult = response.xml("MetricResponses")?;

    tracing::debug!(count = result.usage_metrics.len(), "usage metrics fetched");
    Ok(response.into_response(result))
}
