//! HTTP client shared by all Azure service crates.
//!
//! This module provides [`ServiceClient`], which owns the HTTP transport, the
//! endpoint, the credential and (for service management) the subscription ID,
//! and executes [`RestOperation`]s against them.
//!
//! # Examples
//!
//! ## Service management with a bearer token
//! ```rust,no_run
//! use azure_rest_core::client::ServiceClient;
//! use azure_rest_core::auth::AzureCredential;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ServiceClient::builder()
//!     .endpoint("https://management.core.windows.net")
//!     .subscription_id("00000000-0000-0000-0000-000000000000")
//!     .credential(AzureCredential::bearer("token"))
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage with a shared access signature
//! ```rust,no_run
//! use azure_rest_core::client::ServiceClient;
//! use azure_rest_core::auth::AzureCredential;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ServiceClient::builder()
//!     .endpoint("https://myaccount.blob.core.windows.net")
//!     .credential(AzureCredential::sas("sv=2019-12-12&sig=..."))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::auth::{AzureCredential, Authorization, MANAGEMENT_SCOPE};
use crate::error::{AzureError, AzureResult};
use crate::operation::{RequestBody, RestOperation};
use crate::response::{header_str, RawResponse, ERROR_CODE_HEADER, REQUEST_ID_HEADER};
use crate::xml::XmlElement;
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client as HttpClient, Method};
use url::Url;

use std::time::Duration;

/// Default connection timeout (10 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default read/response timeout (60 seconds).
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);

/// `User-Agent` sent by clients built without a custom HTTP client.
pub const USER_AGENT: &str = concat!("azure-rest-rust/", env!("CARGO_PKG_VERSION"));

/// The client used by every service crate to call Azure REST endpoints.
///
/// Each call sends exactly one request; nothing is retried or cached.
/// The client is cheaply cloneable and can be shared across threads.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    pub(crate) http: HttpClient,
    pub(crate) endpoint: Url,
    pub(crate) credential: AzureCredential,
    pub(crate) subscription_id: Option<String>,
    pub(crate) api_version: Option<String>,
}

/// Builder for constructing a [`ServiceClient`].
///
/// Use [`ServiceClient::builder()`] to create a new builder.
#[derive(Debug, Default)]
pub struct ServiceClientBuilder {
    endpoint: Option<String>,
    credential: Option<AzureCredential>,
    credential_scope: Option<String>,
    subscription_id: Option<String>,
    api_version: Option<String>,
    http_client: Option<HttpClient>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
}

impl ServiceClient {
    /// Create a new builder for configuring a `ServiceClient`.
    pub fn builder() -> ServiceClientBuilder {
        ServiceClientBuilder::default()
    }

    /// Get the base endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The API version override, if one was configured.
    ///
    /// Service crates fall back to their own default version when unset.
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// The subscription ID used by service management operations.
    ///
    /// # Errors
    ///
    /// Returns [`AzureError::MissingConfig`] when no subscription ID was configured.
    pub fn subscription_id(&self) -> AzureResult<&str> {
        self.subscription_id.as_deref().ok_or_else(|| {
            AzureError::MissingConfig(
                "subscription id is required. Set it via builder or AZURE_SUBSCRIPTION_ID env var."
                    .into(),
            )
        })
    }

    /// Build a full URL from path segments relative to the endpoint.
    ///
    /// Each segment is percent-encoded on its own, so identifiers containing
    /// spaces or `/` cannot change the resource path.
    pub fn url<S: AsRef<str>>(&self, segments: &[S]) -> AzureResult<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| AzureError::invalid_endpoint("endpoint cannot be a base URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Execute an operation and read the whole response body.
    ///
    /// Automatically adds authentication. Returns an error if the status is not
    /// one the operation expects.
    pub async fn execute(&self, operation: RestOperation) -> AzureResult<RawResponse> {
        let response = self.send(&operation).await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        tracing::debug!(
            status = status.as_u16(),
            request_id = header_str(&headers, REQUEST_ID_HEADER).unwrap_or_default(),
            "request completed"
        );
        Ok(RawResponse::new(status, headers, body))
    }

    /// Execute an operation and return the response without reading its body.
    ///
    /// Only the status is checked; the caller is responsible for consuming the
    /// body (for example as a byte stream).
    pub async fn execute_stream(&self, operation: RestOperation) -> AzureResult<reqwest::Response> {
        self.send(&operation).await
    }

    async fn send(&self, operation: &RestOperation) -> AzureResult<reqwest::Response> {
        let mut url = self.url(operation.segments())?;
        let auth = self.credential.resolve().await?;

        let mut query: Vec<(String, String)> = operation.query_pairs().to_vec();
        if let Authorization::Query(sas) = &auth {
            query.extend(url::form_urlencoded::parse(sas.as_bytes()).into_owned());
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(&query);
        }

        tracing::debug!(method = %operation.method(), path = %url.path(), "sending request");

        let mut request = self.http.request(operation.method().clone(), url);
        if let Authorization::Header(value) = auth {
            request = request.header(AUTHORIZATION, value);
        }
        for (name, value) in operation.headers() {
            request = request.header(name.as_str(), value.as_str());
        }
        request = match operation.body() {
            RequestBody::Content {
                content,
                content_type,
            } => request
                .header(CONTENT_TYPE, content_type.as_str())
                .body(content.clone()),
            RequestBody::Empty
                if *operation.method() == Method::PUT || *operation.method() == Method::POST =>
            {
                request.header(CONTENT_LENGTH, 0).body(Vec::<u8>::new())
            }
            RequestBody::Empty => request,
        };

        let response = request.send().await?;

        if operation.accepts(response.status()) {
            Ok(response)
        } else {
            let err = Self::error_from_response(response).await;
            tracing::warn!(
                status = err.status().unwrap_or_default(),
                code = err.error_code().unwrap_or_default(),
                "service returned an error"
            );
            Err(err)
        }
    }

    /// Maximum length for error messages to prevent sensitive data leaks.
    const MAX_ERROR_MESSAGE_LEN: usize = 1000;

    /// Sanitize error messages by removing bearer tokens and SAS signatures.
    ///
    /// This prevents credentials from being accidentally logged or exposed in error messages.
    pub(crate) fn sanitize_error_message(msg: &str) -> String {
        let mut result = msg.to_string();
        Self::redact_after(&mut result, "Bearer ");
        Self::redact_after(&mut result, "sig=");
        result
    }

    /// Replace every value following `marker` with `[REDACTED]`.
    fn redact_after(result: &mut String, marker: &str) {
        const REDACTED: &str = "[REDACTED]";

        // Use offset to avoid infinite loops
        let mut search_start = 0;
        while search_start < result.len() {
            let Some(relative_pos) = result[search_start..].find(marker) else {
                break;
            };
            let value_start = search_start + relative_pos + marker.len();
            if value_start >= result.len() {
                break;
            }

            // Skip if already redacted
            if result[value_start..].starts_with(REDACTED) {
                search_start = value_start + REDACTED.len();
                continue;
            }

            let value_end = result[value_start..]
                .find(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | ',' | '&' | '<'))
                .map(|pos| value_start + pos)
                .unwrap_or(result.len());

            if value_end > value_start {
                result.replace_range(value_start..value_end, REDACTED);
                search_start = value_start + REDACTED.len();
            } else {
                search_start = value_start;
            }
        }
    }

    /// Truncate a message if it exceeds the maximum length.
    /// Also sanitizes sensitive data before truncating.
    pub(crate) fn truncate_message(msg: &str) -> String {
        // Sanitize first to ensure sensitive data is removed before truncation
        let sanitized = Self::sanitize_error_message(msg);

        if sanitized.len() > Self::MAX_ERROR_MESSAGE_LEN {
            let mut cut = Self::MAX_ERROR_MESSAGE_LEN;
            while !sanitized.is_char_boundary(cut) {
                cut -= 1;
            }
            format!("{}... (truncated)", &sanitized[..cut])
        } else {
            sanitized
        }
    }

    /// Convert an unexpected response into a typed error.
    ///
    /// The error payload is taken from a JSON `{"error": {...}}` body, an XML
    /// `<Error>` body, or the `x-ms-error-code` header, in that order.
    async fn error_from_response(response: reqwest::Response) -> AzureError {
        let status = response.status();
        let request_id = header_str(response.headers(), REQUEST_ID_HEADER).map(str::to_string);
        let header_code = header_str(response.headers(), ERROR_CODE_HEADER).map(str::to_string);
        let body = response.text().await.unwrap_or_default();

        if let Some((code, message)) = Self::parse_error_body(&body) {
            return AzureError::Service {
                status: status.as_u16(),
                code,
                message: Self::truncate_message(message.as_deref().unwrap_or(&body)),
                request_id,
            };
        }

        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or_default().to_string()
        } else {
            Self::truncate_message(&body)
        };

        match header_code {
            Some(code) => AzureError::Service {
                status: status.as_u16(),
                code,
                message,
                request_id,
            },
            None => AzureError::http(status.as_u16(), message),
        }
    }

    /// Extract `(code, message)` from a JSON or XML error body.
    fn parse_error_body(body: &str) -> Option<(String, Option<String>)> {
        let trimmed = body.trim_start_matches('\u{feff}').trim();

        if trimmed.starts_with('{') {
            let value = serde_json::from_str::<serde_json::Value>(trimmed).ok()?;
            let err_obj = value.get("error").unwrap_or(&value);
            let code = err_obj.get("code").and_then(|c| c.as_str())?;
            let message = err_obj
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string);
            return Some((code.to_string(), message));
        }

        if trimmed.starts_with('<') {
            let element = XmlElement::parse(trimmed.as_bytes()).ok()?;
            let code = element.child_text("Code")?;
            return Some((code, element.child_text("Message")));
        }

        None
    }
}

impl ServiceClientBuilder {
    /// Set the service endpoint URL.
    ///
    /// Examples: `https://management.core.windows.net`,
    /// `https://<account>.blob.core.windows.net`,
    /// `https://<resource>.communication.azure.com`.
    ///
    /// If not set, the builder will check the `AZURE_SERVICE_ENDPOINT`
    /// environment variable.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the credential to use for authentication.
    ///
    /// If not set, the builder will use [`AzureCredential::from_env_with_scope()`]
    /// with the [`credential_scope`](Self::credential_scope).
    pub fn credential(mut self, credential: AzureCredential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Set the OAuth scope of the environment credential.
    ///
    /// Only used when no [`credential`](Self::credential) is set. Defaults to
    /// [`MANAGEMENT_SCOPE`](crate::auth::MANAGEMENT_SCOPE).
    pub fn credential_scope(mut self, scope: impl Into<String>) -> Self {
        self.credential_scope = Some(scope.into());
        self
    }

    /// Set the subscription ID used in service management paths.
    ///
    /// If not set, the builder will check the `AZURE_SUBSCRIPTION_ID`
    /// environment variable.
    pub fn subscription_id(mut self, subscription_id: impl Into<String>) -> Self {
        self.subscription_id = Some(subscription_id.into());
        self
    }

    /// Override the API version sent by every operation.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Set a custom HTTP client.
    ///
    /// Use this to configure proxies, TLS client certificates, or other HTTP settings.
    ///
    /// **Note:** If you provide a custom HTTP client, any timeout configuration
    /// via [`connect_timeout`](Self::connect_timeout) will be ignored.
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set the connection timeout.
    ///
    /// **Note:** This setting is ignored if a custom HTTP client is provided
    /// via [`http_client`](Self::http_client).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the read timeout.
    ///
    /// This is the maximum time allowed for the entire request/response cycle
    /// including reading the body.
    ///
    /// **Note:** This setting is ignored if a custom HTTP client is provided
    /// via [`http_client`](Self::http_client).
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Build the `ServiceClient`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No endpoint is provided and `AZURE_SERVICE_ENDPOINT` is not set
    /// - The endpoint URL is invalid
    /// - Credential creation fails (when using environment-based credentials)
    /// - The HTTP client cannot be constructed
    pub fn build(self) -> AzureResult<ServiceClient> {
        let endpoint_str = self
            .endpoint
            .or_else(|| std::env::var("AZURE_SERVICE_ENDPOINT").ok())
            .ok_or_else(|| {
                AzureError::MissingConfig(
                    "endpoint is required. Set it via builder or AZURE_SERVICE_ENDPOINT env var."
                        .into(),
                )
            })?;

        let endpoint = Url::parse(&endpoint_str)
            .map_err(|e| AzureError::invalid_endpoint_with_source("invalid endpoint URL", e))?;
        if endpoint.cannot_be_a_base() {
            return Err(AzureError::invalid_endpoint("endpoint cannot be a base URL"));
        }

        let http = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .connect_timeout(self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT))
                .timeout(self.read_timeout.unwrap_or(DEFAULT_READ_TIMEOUT))
                .user_agent(USER_AGENT)
                .build()?,
        };

        let credential = match self.credential {
            Some(credential) => credential,
            None => AzureCredential::from_env_with_scope(
                self.credential_scope.as_deref().unwrap_or(MANAGEMENT_SCOPE),
            )?,
        };

        let subscription_id = self
            .subscription_id
            .or_else(|| std::env::var("AZURE_SUBSCRIPTION_ID").ok())
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().to_string());

        Ok(ServiceClient {
            http,
            endpoint,
            credential,
            subscription_id,
            api_version: self.api_version,
        })
    }
}
