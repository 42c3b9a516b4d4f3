//! Declarative description of a single REST call.
//!
//! Every service operation in the SDK is expressed as a [`RestOperation`]:
//! verb, resource path, query, headers, body and the status codes that count
//! as success. [`ServiceClient::execute`](crate::client::ServiceClient::execute)
//! turns it into one HTTP request.
//!
//! ```
//! use azure_rest_core::operation::RestOperation;
//! use reqwest::StatusCode;
//!
//! let op = RestOperation::get(["sub-123", "services", "networking", "vnet1"])
//!     .segment("gateway")
//!     .header("x-ms-version", "2014-05-01")
//!     .expect(StatusCode::OK);
//!
//! assert_eq!(op.segments().len(), 5);
//! ```

use crate::error::AzureResult;
use bytes::Bytes;
use reqwest::{Method, StatusCode};
use serde::Serialize;

/// Content type used for XML request bodies.
pub const CONTENT_TYPE_XML: &str = "application/xml";

/// Content type used for JSON request bodies.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type used for raw binary request bodies.
pub const CONTENT_TYPE_OCTET_STREAM: &str = "application/octet-stream";

/// A serialized request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// Serialized content with its content type.
    Content { content: Bytes, content_type: String },
}

/// A single REST call, ready to be executed by a
/// [`ServiceClient`](crate::client::ServiceClient).
#[derive(Debug, Clone)]
pub struct RestOperation {
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: RequestBody,
    expected: Vec<StatusCode>,
}

impl RestOperation {
    /// Create an operation for `method` on the given path segments.
    ///
    /// Segments are kept verbatim and percent-encoded individually, relative
    /// to the client endpoint.
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            method,
            segments: segments
                .into_iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            expected: Vec::new(),
        }
    }

    /// A `GET` operation.
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Method::GET, segments)
    }

    /// A `POST` operation.
    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Method::POST, segments)
    }

    /// A `PUT` operation.
    pub fn put<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Method::PUT, segments)
    }

    /// A `DELETE` operation.
    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Method::DELETE, segments)
    }

    /// A `HEAD` operation.
    pub fn head<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(Method::HEAD, segments)
    }

    /// Append one path segment.
    pub fn segment(mut self, segment: impl AsRef<str>) -> Self {
        self.segments.push(segment.as_ref().to_string());
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Append a query parameter when `value` is set.
    pub fn query_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Set a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set a request header when `value` is set.
    pub fn header_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.header(name, value),
            None => self,
        }
    }

    /// Use an XML document as the body.
    pub fn xml_body(self, body: impl Into<String>) -> Self {
        self.bytes_body(Bytes::from(body.into()), CONTENT_TYPE_XML)
    }

    /// Serialize `body` as JSON.
    pub fn json_body<T: Serialize>(self, body: &T) -> AzureResult<Self> {
        let content = serde_json::to_vec(body)?;
        Ok(self.bytes_body(Bytes::from(content), CONTENT_TYPE_JSON))
    }

    /// Use raw bytes as the body.
    pub fn bytes_body(mut self, content: Bytes, content_type: &str) -> Self {
        self.body = RequestBody::Content {
            content,
            content_type: content_type.to_string(),
        };
        self
    }

    /// Accept `status` as success. May be called more than once.
    ///
    /// Without any expected status, every 2xx status is accepted.
    pub fn expect(mut self, status: StatusCode) -> Self {
        self.expected.push(status);
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path segments, relative to the client endpoint.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The query parameters.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// The request headers.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The request body.
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Whether `status` counts as success for this operation.
    pub fn accepts(&self, status: StatusCode) -> bool {
        if self.expected.is_empty() {
            status.is_success()
        } else {
            self.expected.contains(&status)
        }
    }
}
