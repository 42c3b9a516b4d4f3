//! Buffered responses and the typed response wrapper returned by every operation.

use crate::error::{AzureError, AzureResult};
use crate::xml::{FromXml, XmlElement};
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::ops::Deref;

/// Header carrying the server-assigned request identifier.
pub const REQUEST_ID_HEADER: &str = "x-ms-request-id";

/// Header carrying the service error code (storage, on bodiless responses).
pub const ERROR_CODE_HEADER: &str = "x-ms-error-code";

/// A successful response with its body fully read.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl RawResponse {
    /// Create a response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// The HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The HTTP status as a number.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// All response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A header value, if present and valid ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        header_str(&self.headers, name)
    }

    /// The `x-ms-request-id` header.
    pub fn request_id(&self) -> Option<String> {
        self.header(REQUEST_ID_HEADER).map(str::to_string)
    }

    /// The raw body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume the response, returning the body.
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// The body as UTF-8 text, without a byte order mark.
    pub fn text(&self) -> AzureResult<String> {
        let body = self.body.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&self.body);
        String::from_utf8(body.to_vec())
            .map_err(|e| AzureError::Deserialization(format!("response is not valid UTF-8: {e}")))
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> AzureResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Parse the body as an XML document with the given root element.
    pub fn xml<T: FromXml>(&self, root: &str) -> AzureResult<T> {
        T::from_xml(&XmlElement::parse_root(&self.body, root)?)
    }

    /// Like [`Self::xml`], but an empty body yields `None`.
    pub fn xml_opt<T: FromXml>(&self, root: &str) -> AzureResult<Option<T>> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        self.xml(root).map(Some)
    }

    /// Wrap `value` together with this response's status and request ID.
    pub fn into_response<T>(self, value: T) -> ServiceResponse<T> {
        ServiceResponse {
            status_code: self.status_code(),
            request_id: self.request_id(),
            value,
        }
    }
}

/// Read a header value as a string slice.
pub fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// A standard service response: the parsed value plus the HTTP status code
/// and request ID of the call that produced it.
///
/// Dereferences to the value.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse<T> {
    /// HTTP status code returned by the service.
    pub status_code: u16,
    /// Value of the `x-ms-request-id` response header.
    pub request_id: Option<String>,
    /// The parsed response.
    pub value: T,
}

impl<T> ServiceResponse<T> {
    /// Discard the metadata and return the value.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Transform the value, keeping the metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ServiceResponse<U> {
        ServiceResponse {
            status_code: self.status_code,
            request_id: self.request_id,
            value: f(self.value),
        }
    }
}

impl<T> Deref for ServiceResponse<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}
