//! Blob storage options, request conditions and response header models.

use azure_rest_core::error::{AzureError, AzureResult};
use azure_rest_core::operation::RestOperation;
use azure_rest_core::response::{header_str, REQUEST_ID_HEADER};
use azure_rest_core::time::{format_http_date, parse_http_date};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt::{self, Display};
use std::str::FromStr;

const METADATA_PREFIX: &str = "x-ms-meta-";

/// Declares a set of string values used in storage headers.
///
/// The `open` form keeps values it does not know in an `Other` variant
/// instead of rejecting them.
macro_rules! header_enum {
    ($(#[$meta:meta])* open $name:ident { $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// A value this client does not know yet, kept as sent.
            Other(String),
        }

        impl $name {
            /// The wire representation.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $value,)+
                    Self::Other(value) => value,
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($value) {
                        return Ok(Self::$variant);
                    }
                )+
                Ok(Self::Other(s.to_string()))
            }
        }
    };
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// The wire representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AzureError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($value) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(AzureError::Deserialization(format!(
                    concat!("unknown ", stringify!($name), " '{}'"),
                    s
                )))
            }
        }
    };
}

header_enum! {
    /// Kind of blob.
    BlobType {
        BlockBlob => "BlockBlob",
        PageBlob => "PageBlob",
        AppendBlob => "AppendBlob",
    }
}

header_enum! {
    /// Lease state of a blob or container.
    LeaseStateType {
        Available => "available",
        Leased => "leased",
        Expired => "expired",
        Breaking => "breaking",
        Broken => "broken",
    }
}

header_enum! {
    /// Lease status of a blob or container.
    LeaseStatusType {
        Locked => "locked",
        Unlocked => "unlocked",
    }
}

header_enum! {
    /// Whether a lease is infinite or of fixed duration.
    LeaseDurationType {
        Infinite => "infinite",
        Fixed => "fixed",
    }
}

header_enum! {
    /// Access tier of a blob.
    open AccessTier {
        P4 => "P4",
        P6 => "P6",
        P10 => "P10",
        P15 => "P15",
        P20 => "P20",
        P30 => "P30",
        P40 => "P40",
        P50 => "P50",
        P60 => "P60",
        P70 => "P70",
        P80 => "P80",
        Hot => "Hot",
        Cool => "Cool",
        Archive => "Archive",
    }
}

header_enum! {
    /// State of the last copy operation into a blob.
    CopyStatusType {
        Pending => "pending",
        Success => "success",
        Aborted => "aborted",
        Failed => "failed",
    }
}

header_enum! {
    /// What to do with a blob's snapshots when deleting it.
    DeleteSnapshotsOption {
        /// Delete the blob and all of its snapshots.
        Include => "include",
        /// Delete only the snapshots.
        Only => "only",
    }
}

/// A byte range of a blob.
///
/// `count: None` means "to the end of the blob". The range `(0, None)` covers
/// the whole blob and sends no range header at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlobRange {
    pub offset: u64,
    pub count: Option<u64>,
}

impl BlobRange {
    pub fn new(offset: u64, count: Option<u64>) -> Self {
        Self { offset, count }
    }

    /// The `x-ms-range` header value, or `None` for the whole blob.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero or the range ends past `u64::MAX`.
    pub fn header_value(&self) -> AzureResult<Option<String>> {
        match self.count {
            Some(0) => Err(AzureError::InvalidArgument(
                "range count must be greater than zero".into(),
            )),
            Some(count) => {
                let end = self.offset.checked_add(count - 1).ok_or_else(|| {
                    AzureError::InvalidArgument(format!(
                        "range end overflows: offset {} count {count}",
                        self.offset
                    ))
                })?;
                Ok(Some(format!("bytes={}-{end}", self.offset)))
            }
            None if self.offset == 0 => Ok(None),
            None => Ok(Some(format!("bytes={}-", self.offset))),
        }
    }
}

/// Conditional headers for blob requests.
///
/// A request whose conditions are not met fails with status 304 (reads with
/// `If-None-Match`/`If-Modified-Since`) or 412.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobRequestConditions {
    pub if_modified_since: Option<DateTime<Utc>>,
    pub if_unmodified_since: Option<DateTime<Utc>>,
    pub if_match: Option<String>,
    pub if_none_match: Option<String>,
    pub lease_id: Option<String>,
}

impl BlobRequestConditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn if_modified_since(mut self, value: DateTime<Utc>) -> Self {
        self.if_modified_since = Some(value);
        self
    }

    pub fn if_unmodified_since(mut self, value: DateTime<Utc>) -> Self {
        self.if_unmodified_since = Some(value);
        self
    }

    pub fn if_match(mut self, etag: impl Into<String>) -> Self {
        self.if_match = Some(etag.into());
        self
    }

    pub fn if_none_match(mut self, etag: impl Into<String>) -> Self {
        self.if_none_match = Some(etag.into());
        self
    }

    pub fn lease_id(mut self, lease_id: impl Into<String>) -> Self {
        self.lease_id = Some(lease_id.into());
        self
    }

    pub(crate) fn apply(&self, op: RestOperation) -> RestOperation {
        op.header_opt(
            "If-Modified-Since",
            self.if_modified_since.as_ref().map(format_http_date),
        )
        .header_opt(
            "If-Unmodified-Since",
            self.if_unmodified_since.as_ref().map(format_http_date),
        )
        .header_opt("If-Match", self.if_match.clone())
        .header_opt("If-None-Match", self.if_none_match.clone())
        .header_opt("x-ms-lease-id", self.lease_id.clone())
    }
}

/// Options for [`crate::blob::get_properties`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobGetPropertiesOptions {
    pub snapshot: Option<String>,
    pub conditions: BlobRequestConditions,
}

impl BlobGetPropertiesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the properties of a snapshot instead of the base blob.
    pub fn snapshot(mut self, snapshot: impl Into<String>) -> Self {
        self.snapshot = Some(snapshot.into());
        self
    }

    pub fn conditions(mut self, conditions: BlobRequestConditions) -> Self {
        self.conditions = conditions;
        self
    }
}

/// Options for [`crate::blob::download`] and [`crate::blob::download_stream`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobDownloadOptions {
    pub snapshot: Option<String>,
    pub range: Option<BlobRange>,
    /// Ask the service for the MD5 of the returned range (ranges up to 4 MiB).
    pub range_get_content_md5: bool,
    pub conditions: BlobRequestConditions,
}

impl BlobDownloadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(mut self, snapshot: impl Into<String>) -> Self {
        self.snapshot = Some(snapshot.into());
        self
    }

    pub fn range(mut self, range: BlobRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn range_get_content_md5(mut self, enabled: bool) -> Self {
        self.range_get_content_md5 = enabled;
        self
    }

    pub fn conditions(mut self, conditions: BlobRequestConditions) -> Self {
        self.conditions = conditions;
        self
    }
}

/// Options for [`crate::blob::delete`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobDeleteOptions {
    pub snapshot: Option<String>,
    pub delete_snapshots: Option<DeleteSnapshotsOption>,
    pub conditions: BlobRequestConditions,
}

impl BlobDeleteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(mut self, snapshot: impl Into<String>) -> Self {
        self.snapshot = Some(snapshot.into());
        self
    }

    pub fn delete_snapshots(mut self, option: DeleteSnapshotsOption) -> Self {
        self.delete_snapshots = Some(option);
        self
    }

    pub fn conditions(mut self, conditions: BlobRequestConditions) -> Self {
        self.conditions = conditions;
        self
    }
}

/// Headers common to every storage response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageResponseHeaders {
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub date: Option<DateTime<Utc>>,
    /// Service version that handled the request.
    pub version: Option<String>,
    pub request_id: Option<String>,
    /// MD5 of the content the service received, where it reports one.
    pub content_md5: Option<Vec<u8>>,
    /// Whether the written content was encrypted at rest.
    pub is_server_encrypted: Option<bool>,
}

impl StorageResponseHeaders {
    pub fn from_headers(headers: &HeaderMap) -> AzureResult<Self> {
        Ok(Self {
            etag: header_string(headers, "etag"),
            last_modified: header_date(headers, "last-modified")?,
            date: header_date(headers, "date")?,
            version: header_string(headers, "x-ms-version"),
            request_id: header_string(headers, REQUEST_ID_HEADER),
            content_md5: header_md5(headers, "content-md5")?,
            is_server_encrypted: header_parse(headers, "x-ms-request-server-encrypted")?,
        })
    }
}

/// Properties and system headers of a blob, as returned by `HEAD` and `GET`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlobProperties {
    pub last_modified: Option<DateTime<Utc>>,
    pub creation_time: Option<DateTime<Utc>>,
    pub metadata: HashMap<String, String>,
    pub blob_type: Option<BlobType>,
    pub copy_completion_time: Option<DateTime<Utc>>,
    pub copy_status_description: Option<String>,
    pub copy_id: Option<String>,
    pub copy_progress: Option<String>,
    pub copy_source: Option<String>,
    pub copy_status: Option<CopyStatusType>,
    pub is_incremental_copy: Option<bool>,
    pub destination_snapshot: Option<String>,
    pub lease_duration: Option<LeaseDurationType>,
    pub lease_state: Option<LeaseStateType>,
    pub lease_status: Option<LeaseStatusType>,
    pub content_length: Option<u64>,
    pub content_type: Option<String>,
    /// `Content-Range` of a ranged download, e.g. `bytes 0-4/7`.
    pub content_range: Option<String>,
    pub etag: Option<String>,
    pub content_md5: Option<Vec<u8>>,
    /// MD5 of the whole blob, returned with ranged downloads.
    pub blob_content_md5: Option<Vec<u8>>,
    pub content_encoding: Option<String>,
    pub content_disposition: Option<String>,
    pub content_language: Option<String>,
    pub cache_control: Option<String>,
    pub blob_sequence_number: Option<i64>,
    pub date: Option<DateTime<Utc>>,
    pub version: Option<String>,
    pub request_id: Option<String>,
    pub accept_ranges: Option<String>,
    pub blob_committed_block_count: Option<u32>,
    pub is_server_encrypted: Option<bool>,
    pub encryption_key_sha256: Option<String>,
    pub access_tier: Option<AccessTier>,
    pub access_tier_inferred: Option<bool>,
    pub archive_status: Option<String>,
    pub access_tier_change_time: Option<DateTime<Utc>>,
}

impl BlobProperties {
    pub fn from_headers(headers: &HeaderMap) -> AzureResult<Self> {
        Ok(Self {
            last_modified: header_date(headers, "last-modified")?,
            creation_time: header_date(headers, "x-ms-creation-time")?,
            metadata: metadata(headers),
            blob_type: header_parse(headers, "x-ms-blob-type")?,
            copy_completion_time: header_date(headers, "x-ms-copy-completion-time")?,
            copy_status_description: header_string(headers, "x-ms-copy-status-description"),
            copy_id: header_string(headers, "x-ms-copy-id"),
            copy_progress: header_string(headers, "x-ms-copy-progress"),
            copy_source: header_string(headers, "x-ms-copy-source"),
            copy_status: header_parse(headers, "x-ms-copy-status")?,
            is_incremental_copy: header_parse(headers, "x-ms-incremental-copy")?,
            destination_snapshot: header_string(headers, "x-ms-copy-destination-snapshot"),
            lease_duration: header_parse(headers, "x-ms-lease-duration")?,
            lease_state: header_parse(headers, "x-ms-lease-state")?,
            lease_status: header_parse(headers, "x-ms-lease-status")?,
            content_length: header_parse(headers, "content-length")?,
            content_type: header_string(headers, "content-type"),
            content_range: header_string(headers, "content-range"),
            etag: header_string(headers, "etag"),
            content_md5: header_md5(headers, "content-md5")?,
            blob_content_md5: header_md5(headers, "x-ms-blob-content-md5")?,
            content_encoding: header_string(headers, "content-encoding"),
            content_disposition: header_string(headers, "content-disposition"),
            content_language: header_string(headers, "content-language"),
            cache_control: header_string(headers, "cache-control"),
            blob_sequence_number: header_parse(headers, "x-ms-blob-sequence-number")?,
            date: header_date(headers, "date")?,
            version: header_string(headers, "x-ms-version"),
            request_id: header_string(headers, REQUEST_ID_HEADER),
            accept_ranges: header_string(headers, "accept-ranges"),
            blob_committed_block_count: header_parse(headers, "x-ms-blob-committed-block-count")?,
            is_server_encrypted: header_parse(headers, "x-ms-server-encrypted")?,
            encryption_key_sha256: header_string(headers, "x-ms-encryption-key-sha256"),
            access_tier: header_parse(headers, "x-ms-access-tier")?,
            access_tier_inferred: header_parse(headers, "x-ms-access-tier-inferred")?,
            archive_status: header_string(headers, "x-ms-archive-status"),
            access_tier_change_time: header_date(headers, "x-ms-access-tier-change-time")?,
        })
    }
}

/// A downloaded blob (or range of it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobDownloadResult {
    pub content: Bytes,
    pub properties: BlobProperties,
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    header_str(headers, name).map(str::to_string)
}

fn header_parse<T>(headers: &HeaderMap, name: &str) -> AzureResult<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    header_str(headers, name)
        .map(|value| {
            value.trim().parse::<T>().map_err(|e| {
                AzureError::Deserialization(format!("invalid {name} header '{value}': {e}"))
            })
        })
        .transpose()
}

fn header_date(headers: &HeaderMap, name: &str) -> AzureResult<Option<DateTime<Utc>>> {
    header_str(headers, name).map(parse_http_date).transpose()
}

fn header_md5(headers: &HeaderMap, name: &str) -> AzureResult<Option<Vec<u8>>> {
    header_str(headers, name)
        .map(|value| {
            STANDARD.decode(value.trim()).map_err(|e| {
                AzureError::Deserialization(format!("invalid {name} header '{value}': {e}"))
            })
        })
        .transpose()
}

fn metadata(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let key = name.as_str().strip_prefix(METADATA_PREFIX)?;
            Some((key.to_string(), value.to_str().ok()?.to_string()))
        })
        .collect()
}
