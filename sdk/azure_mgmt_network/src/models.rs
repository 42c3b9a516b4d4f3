//! Request and response models for network management operations.

use azure_rest_core::error::{AzureError, AzureResult};
use azure_rest_core::xml::{FromXml, XmlElement};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// A client root certificate installed on a virtual network gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRootCertificate {
    /// When the certificate expires.
    pub expiration_time: Option<DateTime<Utc>>,
    /// Certificate subject, e.g. `CN=RootCert`.
    pub subject: Option<String>,
    /// Certificate thumbprint.
    pub thumbprint: Option<String>,
}

impl FromXml for ClientRootCertificate {
    fn from_xml(element: &XmlElement) -> AzureResult<Self> {
        Ok(Self {
            expiration_time: element.child_datetime("ExpirationTime")?,
            subject: element.child_text("Subject"),
            thumbprint: element.child_text("Thumbprint"),
        })
    }
}

/// Response of listing client root certificates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClientRootCertificateList {
    pub client_root_certificates: Vec<ClientRootCertificate>,
}

impl FromXml for ClientRootCertificateList {
    fn from_xml(element: &XmlElement) -> AzureResult<Self> {
        Ok(Self {
            client_root_certificates: element
                .children_named("ClientRootCertificate")
                .map(ClientRootCertificate::from_xml)
                .collect::<AzureResult<_>>()?,
        })
    }
}

/// Parameters for uploading a client root certificate.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRootCertificateCreateParameters {
    /// The public certificate data, base64 encoded (PEM body without headers).
    pub certificate: String,
}

impl ClientRootCertificateCreateParameters {
    /// Create parameters for the given certificate data.
    pub fn new(certificate: impl Into<String>) -> Self {
        Self {
            certificate: certificate.into(),
        }
    }
}

/// Identifier of an asynchronous gateway operation accepted by the service.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GatewayOperation {
    /// Operation ID to pass to [`crate::operation::get_status`].
    pub operation_id: Option<String>,
}

impl FromXml for GatewayOperation {
    fn from_xml(element: &XmlElement) -> AzureResult<Self> {
        Ok(Self {
            operation_id: element.child_text("ID"),
        })
    }
}

/// State of an asynchronous gateway operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayOperationStatus {
    InProgress,
    Successful,
    Failed,
}

impl GatewayOperationStatus {
    /// Returns `true` when the operation will not change state again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl FromStr for GatewayOperationStatus {
    type Err = AzureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "InProgress" => Ok(Self::InProgress),
            "Successful" => Ok(Self::Successful),
            "Failed" => Ok(Self::Failed),
            other => Err(AzureError::Deserialization(format!(
                "unknown gateway operation status '{other}'"
            ))),
        }
    }
}

impl fmt::Display for GatewayOperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InProgress => "InProgress",
            Self::Successful => "Successful",
            Self::Failed => "Failed",
        };
        write!(f, "{s}")
    }
}

/// Error reported by a failed gateway operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GatewayOperationError {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl FromXml for GatewayOperationError {
    fn from_xml(element: &XmlElement) -> AzureResult<Self> {
        Ok(Self {
            code: element.child_text("Code"),
            message: element.child_text("Message"),
        })
    }
}

/// Current state of an asynchronous gateway operation.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayOperationDetails {
    pub id: Option<String>,
    pub status: GatewayOperationStatus,
    /// HTTP status the operation would have returned synchronously (e.g. `OK`).
    pub http_status_code: Option<String>,
    pub error: Option<GatewayOperationError>,
}

impl FromXml for GatewayOperationDetails {
    fn from_xml(element: &XmlElement) -> AzureResult<Self> {
        let status = element
            .child_parse::<GatewayOperationStatus>("Status")?
            .ok_or_else(|| {
                AzureError::Deserialization("gateway operation has no <Status>".into())
            })?;
        Ok(Self {
            id: element.child_text("ID"),
            status,
            http_status_code: element.child_text("HttpStatusCode"),
            error: element
                .child("Error")
                .filter(|e| !e.is_nil())
                .map(GatewayOperationError::from_xml)
                .transpose()?,
        })
    }
}
