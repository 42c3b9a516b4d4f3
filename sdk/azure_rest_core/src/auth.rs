//! Credentials accepted by the Azure service clients.
//!
//! Service management and chat calls authenticate with a bearer token, storage
//! calls with either a bearer token or a shared access signature (SAS).

use crate::error::{AzureError, AzureResult};
use azure_core::credentials::TokenCredential;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

/// OAuth scope for Azure service management.
pub const MANAGEMENT_SCOPE: &str = "https://management.core.windows.net/.default";

/// OAuth scope for Azure Storage.
pub const STORAGE_SCOPE: &str = "https://storage.azure.com/.default";

/// OAuth scope for Azure Communication Services.
pub const COMMUNICATION_SCOPE: &str = "https://communication.azure.com/.default";

/// Credential types supported by the service clients.
#[derive(Clone)]
pub enum AzureCredential {
    /// A pre-acquired access token, sent as `Authorization: Bearer <token>`.
    Bearer(SecretString),

    /// A shared access signature whose query pairs are appended to every URL.
    SharedAccessSignature(SecretString),

    /// Any `azure_core` token credential, resolved for the given scopes on each call.
    TokenCredential {
        credential: Arc<dyn TokenCredential>,
        scopes: Vec<String>,
    },

    /// No authorization at all (public containers, local emulators).
    Anonymous,
}

/// How a resolved credential is attached to a request.
#[derive(Clone, PartialEq, Eq)]
pub enum Authorization {
    /// Value for the `Authorization` header.
    Header(String),
    /// Query string to append to the request URL.
    Query(String),
    /// Nothing to attach.
    None,
}

impl std::fmt::Debug for Authorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Header(_) => write!(f, "Authorization::Header(****)"),
            Self::Query(_) => write!(f, "Authorization::Query(****)"),
            Self::None => write!(f, "Authorization::None"),
        }
    }
}

impl AzureCredential {
    /// Create a credential from the environment for service management.
    ///
    /// Same as [`from_env_with_scope`](Self::from_env_with_scope) with
    /// [`MANAGEMENT_SCOPE`].
    pub fn from_env() -> AzureResult<Self> {
        Self::from_env_with_scope(MANAGEMENT_SCOPE)
    }

    /// Create a credential from the environment.
    ///
    /// Checks `AZURE_ACCESS_TOKEN` (bearer token), then `AZURE_STORAGE_SAS_TOKEN`
    /// (shared access signature), and falls back to the Azure CLI credential
    /// requesting tokens for `scope`.
    pub fn from_env_with_scope(scope: &str) -> AzureResult<Self> {
        if let Ok(token) = std::env::var("AZURE_ACCESS_TOKEN") {
            if !token.is_empty() {
                return Ok(Self::bearer(token));
            }
        }
        if let Ok(sas) = std::env::var("AZURE_STORAGE_SAS_TOKEN") {
            if !sas.is_empty() {
                return Ok(Self::sas(sas));
            }
        }
        Self::azure_cli(scope)
    }

    /// Create a bearer token credential.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(SecretString::from(token.into()))
    }

    /// Create a shared access signature credential.
    ///
    /// A leading `?` is accepted and ignored.
    pub fn sas(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.strip_prefix('?').map(str::to_string).unwrap_or(token);
        Self::SharedAccessSignature(SecretString::from(token))
    }

    /// Wrap any `azure_core` token credential for the given scope.
    pub fn token_credential(credential: Arc<dyn TokenCredential>, scope: impl Into<String>) -> Self {
        Self::TokenCredential {
            credential,
            scopes: vec![scope.into()],
        }
    }

    /// Use the Azure CLI's logged-in account for the given scope.
    pub fn azure_cli(scope: impl Into<String>) -> AzureResult<Self> {
        let credential = azure_identity::AzureCliCredential::new(None)
            .map_err(|e| AzureError::Auth(format!("failed to create Azure CLI credential: {e}")))?;
        Ok(Self::token_credential(credential, scope))
    }

    /// Resolve the credential to what must be attached to the outgoing request.
    pub async fn resolve(&self) -> AzureResult<Authorization> {
        match self {
            Self::Bearer(token) => Ok(Authorization::Header(format!(
                "Bearer {}",
                token.expose_secret()
            ))),
            Self::SharedAccessSignature(sas) => {
                Ok(Authorization::Query(sas.expose_secret().to_string()))
            }
            Self::TokenCredential { credential, scopes } => {
                let scopes: Vec<&str> = scopes.iter().map(String::as_str).collect();
                let token = credential
                    .get_token(&scopes, None)
                    .await
                    .map_err(|e| AzureError::Auth(e.to_string()))?;
                Ok(Authorization::Header(format!(
                    "Bearer {}",
                    token.token.secret()
                )))
            }
            Self::Anonymous => Ok(Authorization::None),
        }
    }
}

impl std::fmt::Debug for AzureCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => write!(f, "AzureCredential::Bearer(****)"),
            Self::SharedAccessSignature(_) => write!(f, "AzureCredential::SharedAccessSignature(****)"),
            Self::TokenCredential { scopes, .. } => f
                .debug_struct("AzureCredential::TokenCredential")
                .field("scopes", scopes)
                .finish_non_exhaustive(),
            Self::Anonymous => write!(f, "AzureCredential::Anonymous"),
        }
    }
}
