use thiserror::Error;

/// Errors that can occur when calling an Azure service.
#[derive(Error, Debug)]
pub enum AzureError {
    /// The service answered with an unexpected status and no parseable error body.
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    /// The service answered with an unexpected status and a structured error.
    #[error("Service error ({status} {code}): {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
        request_id: Option<String>,
    },

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A JSON payload could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An XML payload could not be read or written.
    #[error("XML error: {0}")]
    Xml(String),

    /// A response was well-formed but a field held an unexpected value.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// The HTTP request failed at the transport level.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint URL is invalid.
    #[error("Invalid endpoint URL: {message}")]
    InvalidEndpoint {
        message: String,
        #[source]
        source: Option<url::ParseError>,
    },

    /// A required configuration value is missing.
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// A required argument was missing or empty.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A long-running operation did not finish within the allowed attempts.
    #[error("Operation timed out: {0}")]
    OperationTimeout(String),
}

impl AzureError {
    /// Create an HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid endpoint error without an underlying parse error.
    pub fn invalid_endpoint(message: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid endpoint error wrapping a URL parse error.
    pub fn invalid_endpoint_with_source(message: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidEndpoint {
            message: message.into(),
            source: Some(source),
        }
    }

    /// The HTTP status code, for errors returned by the service.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } | Self::Service { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The service error code (e.g. `BlobNotFound`), if one was reported.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => Some(code),
            _ => None,
        }
    }

    /// The request ID of the failed call, if the service reported one.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Service { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for AzureError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for AzureError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(e.to_string())
    }
}

/// Result type alias for Azure service operations.
pub type AzureResult<T> = std::result::Result<T, AzureError>;

/// Reject empty (or whitespace-only) required arguments before any request is sent.
pub fn require_non_empty(name: &str, value: &str) -> AzureResult<()> {
    if value.trim().is_empty() {
        return Err(AzureError::InvalidArgument(format!("{name} cannot be empty")));
    }
    Ok(())
}
