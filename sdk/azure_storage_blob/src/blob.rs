//! Block blob operations.
//!
//! A block blob is written in two steps: each block is uploaded with
//! [`stage_block`], then the ordered list of block IDs is committed with
//! [`commit_block_list`]. Blob names may contain `/` to form virtual
//! directories.

use crate::models::{
    BlobDeleteOptions, BlobDownloadOptions, BlobDownloadResult, BlobGetPropertiesOptions,
    BlobProperties, StorageResponseHeaders,
};
use crate::{blob_segments, storage_operation};
use azure_rest_core::client::ServiceClient;
use azure_rest_core::error::{require_non_empty, AzureError, AzureResult};
use azure_rest_core::operation::{RestOperation, CONTENT_TYPE_OCTET_STREAM};
use azure_rest_core::response::{header_str, ServiceResponse, REQUEST_ID_HEADER};
use azure_rest_core::xml::XmlBuilder;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use reqwest::{Method, StatusCode};

/// A blob download whose body has not been read yet.
pub struct BlobDownloadStream {
    /// HTTP status code (200 for the whole blob, 206 for a range).
    pub status_code: u16,
    pub properties: BlobProperties,
    /// The blob content, chunk by chunk.
    pub stream: BoxStream<'static, AzureResult<Bytes>>,
}

impl std::fmt::Debug for BlobDownloadStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobDownloadStream")
            .field("status_code", &self.status_code)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

fn validate_names(container: &str, blob: &str) -> AzureResult<()> {
    require_non_empty("container", container)?;
    require_non_empty("blob", blob)
}

/// Upload one block to be committed later with [`commit_block_list`].
///
/// `block_id` must already be base64 encoded (see [`crate::block_id`]).
///
/// # Tracing
///
/// Emits a span named `azure::storage::blob::stage_block` with fields
/// `container`, `blob` and `block_id`.
#[tracing::instrument(
    name = "azure::storage::blob::stage_block",
    skip(client, data),
    fields(container = %container, blob = %blob, block_id = %block_id)
)]
pub async fn stage_block(
    client: &ServiceClient,
    container: &str,
    blob: &str,
    block_id: &str,
    data: Bytes,
) -> AzureResult<ServiceResponse<StorageResponseHeaders>> {
    validate_names(container, blob)?;
    require_non_empty("block_id", block_id)?;

    tracing::debug!(size = data.len(), "staging block");

    let op = storage_operation(client, Method::PUT, blob_segments(container, blob))
        .query("comp", "block")
        .query("blockid", block_id)
        .bytes_body(data, CONTENT_TYPE_OCTET_STREAM)
        .expect(StatusCode::CREATED);

    let response = client.execute(op).await?;
    let headers = StorageResponseHeaders::from_headers(response.headers())?;
    Ok(response.into_response(headers))
}

/// Commit staged blocks as the content of a block blob.
///
/// The blob content becomes the listed blocks in order. An empty list creates
/// an empty blob. When `overwrite` is `false` the commit fails with 409
/// `BlobAlreadyExists` if the blob exists.
///
/// # Tracing
///
/// Emits a span named `azure::storage::blob::commit_block_list` with fields
/// `container` and `blob`.
#[tracing::instrument(
    name = "azure::storage::blob::commit_block_list",
    skip(client, block_ids),
    fields(container = %container, blob = %blob)
)]
pub async fn commit_block_list<S: AsRef<str>>(
    client: &ServiceClient,
    container: &str,
    blob: &str,
    block_ids: &[S],
    overwrite: bool,
) -> AzureResult<ServiceResponse<StorageResponseHeaders>> {
    validate_names(container, blob)?;

    tracing::debug!(blocks = block_ids.len(), overwrite, "committing block list");

    let mut xml = XmlBuilder::new()?;
    xml.start("BlockList")?;
    for id in block_ids {
        xml.element("Latest", id.as_ref())?;
    }
    xml.end("BlockList")?;

    let mut op = storage_operation(client, Method::PUT, blob_segments(container, blob))
        .query("comp", "blocklist")
        .xml_body(xml.finish()?)
        .expect(StatusCode::CREATED);
    if !overwrite {
        op = op.header("If-None-Match", "*");
    }

    let response = client.execute(op).await?;
    let headers = StorageResponseHeaders::from_headers(response.headers())?;
    Ok(response.into_response(headers))
}

/// Read a blob's properties and system headers without its content.
///
/// A missing blob yields a 404 service error with code `BlobNotFound`.
///
/// # Example
///
/// ```rust,no_run
/// # use azure_rest_core::client::ServiceClient;
/// # use azure_storage_blob::blob;
/// # use azure_storage_blob::models::{BlobGetPropertiesOptions, BlobRequestConditions};
/// # async fn example(client: &ServiceClient, etag: &str) -> azure_rest_core::error::AzureResult<()> {
/// let options = BlobGetPropertiesOptions::new()
///     .conditions(BlobRequestConditions::new().if_match(etag));
/// let props = blob::get_properties(client, "photos", "cat.png", &options).await?;
/// println!("{:?} bytes, tier {:?}", props.content_length, props.access_tier);
/// # Ok(())
/// # }
/// ```
///
/// # Tracing
///
/// Emits a span named `azure::storage::blob::get_properties` with fields
/// `container` and `blob`.
#[tracing::instrument(
    name = "azure::storage::blob::get_properties",
    skip(client, options),
    fields(container = %container, blob = %blob)
)]
pub async fn get_properties(
    client: &ServiceClient,
    container: &str,
    blob: &str,
    options: &BlobGetPropertiesOptions,
) -> AzureResult<ServiceResponse<BlobProperties>> {
    validate_names(container, blob)?;

    tracing::debug!("fetching blob properties");

    let op = storage_operation(client, Method::HEAD, blob_segments(container, blob))
        .query_opt("snapshot", options.snapshot.clone())
        .expect(StatusCode::OK);
    let op = options.conditions.apply(op);

    let response = client.execute(op).await?;
    let properties = BlobProperties::from_headers(response.headers())?;
    Ok(response.into_response(properties))
}

fn download_operation(
    client: &ServiceClient,
    container: &str,
    blob: &str,
    options: &BlobDownloadOptions,
) -> AzureResult<RestOperation> {
    validate_names(container, blob)?;

    let range = match &options.range {
        Some(range) => range.header_value()?,
        None => None,
    };
    if options.range_get_content_md5 && range.is_none() {
        return Err(AzureError::InvalidArgument(
            "range_get_content_md5 requires a bounded range".into(),
        ));
    }

    let op = storage_operation(client, Method::GET, blob_segments(container, blob))
        .query_opt("snapshot", options.snapshot.clone())
        .header_opt("x-ms-range", range)
        .header_opt(
            "x-ms-range-get-content-md5",
            options.range_get_content_md5.then_some("true"),
        )
        .expect(StatusCode::OK)
        .expect(StatusCode::PARTIAL_CONTENT);
    Ok(options.conditions.apply(op))
}

/// Download a blob, or a range of it, into memory.
///
/// Returns status 200 for the whole blob and 206 for a range.
///
/// # Tracing
///
/// Emits a span named `azure::storage::blob::download` with fields
/// `container` and `blob`.
#[tracing::instrument(
    name = "azure::storage::blob::download",
    skip(client, options),
    fields(container = %container, blob = %blob)
)]
pub async fn download(
    client: &ServiceClient,
    container: &str,
    blob: &str,
    options: &BlobDownloadOptions,
) -> AzureResult<ServiceResponse<BlobDownloadResult>> {
    let op = download_operation(client, container, blob, options)?;

    tracing::debug!(range = ?options.range, "downloading blob");

    let response = client.execute(op).await?;
    let properties = BlobProperties::from_headers(response.headers())?;
    let content = response.body().clone();

    tracing::debug!(size = content.len(), "blob downloaded");
    Ok(response.into_response(BlobDownloadResult {
        content,
        properties,
    }))
}

/// Download a blob, or a range of it, as a stream of chunks.
///
/// The status and headers are checked before returning; the body is read as
/// the stream is polled.
///
/// # Example
///
/// ```rust,no_run
/// # use azure_rest_core::client::ServiceClient;
/// # use azure_storage_blob::blob;
/// # use azure_storage_blob::models::BlobDownloadOptions;
/// use futures::StreamExt;
///
/// # async fn example(client: &ServiceClient) -> azure_rest_core::error::AzureResult<()> {
/// let mut download = blob::download_stream(client, "videos", "big.mp4", &BlobDownloadOptions::new()).await?;
/// while let Some(chunk) = download.stream.next().await {
///     let chunk = chunk?;
///     println!("{} bytes", chunk.len());
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Tracing
///
/// Emits a span named `azure::storage::blob::download_stream` with fields
/// `container` and `blob`.
#[tracing::instrument(
    name = "azure::storage::blob::download_stream",
    skip(client, options),
    fields(container = %container, blob = %blob)
)]
pub async fn download_stream(
    client: &ServiceClient,
    container: &str,
    blob: &str,
    options: &BlobDownloadOptions,
) -> AzureResult<BlobDownloadStream> {
    let op = download_operation(client, container, blob, options)?;

    tracing::debug!(range = ?options.range, "starting blob download stream");

    let response = client.execute_stream(op).await?;
    let status_code = response.status().as_u16();
    let properties = BlobProperties::from_headers(response.headers())?;

    tracing::debug!(
        request_id = header_str(response.headers(), REQUEST_ID_HEADER).unwrap_or_default(),
        "blob download stream opened"
    );

    let stream = response.bytes_stream().map_err(AzureError::from).boxed();

    Ok(BlobDownloadStream {
        status_code,
        properties,
        stream,
    })
}

/// Mark a blob for deletion.
///
/// # Tracing
///
/// Emits a span named `azure::storage::blob::delete` with fields
/// `container` and `blob`.
#[tracing::instrument(
    name = "azure::storage::blob::delete",
    skip(client, options),
    fields(container = %container, blob = %blob)
)]
pub async fn delete(
    client: &ServiceClient,
    container: &str,
    blob: &str,
    options: &BlobDeleteOptions,
) -> AzureResult<ServiceResponse<StorageResponseHeaders>> {
    validate_names(container, blob)?;

    tracing::debug!("deleting blob");

    let op = storage_operation(client, Method::DELETE, blob_segments(container, blob))
        .query_opt("snapshot", options.snapshot.clone())
        .header_opt(
            "x-ms-delete-snapshots",
            options.delete_snapshots.map(|o| o.as_str()),
        )
        .expect(StatusCode::ACCEPTED);
    let op = options.conditions.apply(op);

    let response = client.execute(op).await?;
    let headers = StorageResponseHeaders::from_headers(response.headers())?;
    Ok(response.into_response(headers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AccessTier, BlobRange, BlobRequestConditions, BlobType, DeleteSnapshotsOption,
        LeaseStateType, LeaseStatusType,
    };
    use crate::test_utils::{setup_mock_client, DEFAULT_DATA, TEST_ETAG, TEST_LAST_MODIFIED};
    use azure_rest_core::time::format_http_date;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use chrono::{TimeZone, Utc};
    use md5::{Digest, Md5};
    use wiremock::matchers::{body_string, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn blob_headers(template: ResponseTemplate) -> ResponseTemplate {
        template
            .insert_header("etag", TEST_ETAG)
            .insert_header("last-modified", TEST_LAST_MODIFIED)
            .insert_header("x-ms-creation-time", TEST_LAST_MODIFIED)
            .insert_header("x-ms-request-id", "req-blob")
            .insert_header("x-ms-version", "2019-12-12")
            .insert_header("date", "Wed, 21 Oct 2020 07:30:00 GMT")
            .insert_header("x-ms-blob-type", "BlockBlob")
            .insert_header("x-ms-lease-state", "available")
            .insert_header("x-ms-lease-status", "unlocked")
            .insert_header("accept-ranges", "bytes")
            .insert_header("x-ms-server-encrypted", "true")
    }

    fn not_found() -> ResponseTemplate {
        ResponseTemplate::new(404)
            .insert_header("x-ms-error-code", "BlobNotFound")
            .insert_header("x-ms-request-id", "req-missing")
    }

    #[tokio::test]
    async fn test_stage_block() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/photos/cat.txt"))
            .and(query_param("comp", "block"))
            .and(query_param("blockid", "YmxvY2stMQ=="))
            .and(header("content-type", "application/octet-stream"))
            .and(header_exists("x-ms-date"))
            .and(body_string(DEFAULT_DATA))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("x-ms-request-id", "req-stage")
                    .insert_header("x-ms-request-server-encrypted", "true"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let response = stage_block(
            &client,
            "photos",
            "cat.txt",
            "YmxvY2stMQ==",
            Bytes::from_static(DEFAULT_DATA.as_bytes()),
        )
        .await
        .expect("should succeed");

        assert_eq!(response.status_code, 201);
        assert_eq!(response.is_server_encrypted, Some(true));
    }

    #[tokio::test]
    async fn test_commit_block_list_without_overwrite() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/photos/2024/cat.txt"))
            .and(query_param("comp", "blocklist"))
            .and(header("If-None-Match", "*"))
            .and(header("content-type", "application/xml"))
            .and(|req: &Request| {
                String::from_utf8_lossy(&req.body).ends_with(
                    "<BlockList><Latest>YmxvY2stMQ==</Latest><Latest>YmxvY2stMg==</Latest></BlockList>",
                )
            })
            .respond_with(blob_headers(ResponseTemplate::new(201)))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let response = commit_block_list(
            &client,
            "photos",
            "2024/cat.txt",
            &["YmxvY2stMQ==", "YmxvY2stMg=="],
            false,
        )
        .await
        .expect("should succeed");

        assert_eq!(response.status_code, 201);
        assert_eq!(response.etag.as_deref(), Some(TEST_ETAG));
    }

    #[tokio::test]
    async fn test_commit_block_list_overwrite_sends_no_condition() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(query_param("comp", "blocklist"))
            .and(|req: &Request| !req.headers.contains_key("if-none-match"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        commit_block_list::<&str>(&client, "photos", "empty.txt", &[], true)
            .await
            .expect("should succeed");
    }

    #[tokio::test]
    async fn test_commit_existing_blob_without_overwrite_conflicts() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .respond_with(
                ResponseTemplate::new(409)
                    .insert_header("x-ms-error-code", "BlobAlreadyExists")
                    .set_body_string("<?xml version=\"1.0\" encoding=\"utf-8\"?><Error><Code>BlobAlreadyExists</Code><Message>The specified blob already exists.</Message></Error>"),
            )
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let err = commit_block_list(&client, "photos", "cat.txt", &["YmxvY2stMQ=="], false)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(409));
        assert_eq!(err.error_code(), Some("BlobAlreadyExists"));
    }

    #[tokio::test]
    async fn test_get_properties_values() {
        let server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/photos/cat.txt"))
            .and(header("x-ms-version", "2019-12-12"))
            .respond_with(
                blob_headers(ResponseTemplate::new(200))
                    .insert_header("x-ms-access-tier", "Hot")
                    .insert_header("x-ms-access-tier-inferred", "true")
                    .insert_header("content-type", "application/octet-stream"),
            )
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let response = get_properties(&client, "photos", "cat.txt", &BlobGetPropertiesOptions::new())
            .await
            .expect("should succeed");

        assert_eq!(response.status_code, 200);
        assert_eq!(response.request_id.as_deref(), Some("req-blob"));
        assert_eq!(response.etag.as_deref(), Some(TEST_ETAG));
        assert!(response.last_modified.is_some());
        assert!(response.version.is_some());
        assert!(response.date.is_some());
        assert!(response.metadata.is_empty());
        assert_eq!(response.blob_type, Some(BlobType::BlockBlob));
        assert_eq!(response.copy_completion_time, None);
        assert_eq!(response.copy_id, None);
        assert_eq!(response.copy_status, None);
        assert_eq!(response.lease_duration, None);
        assert_eq!(response.lease_state, Some(LeaseStateType::Available));
        assert_eq!(response.lease_status, Some(LeaseStatusType::Unlocked));
        assert!(response.content_type.is_some());
        assert_eq!(response.content_md5, None);
        assert_eq!(response.content_encoding, None);
        assert_eq!(response.cache_control, None);
        assert_eq!(response.blob_sequence_number, None);
        assert_eq!(response.accept_ranges.as_deref(), Some("bytes"));
        assert_eq!(response.blob_committed_block_count, None);
        assert_eq!(response.is_server_encrypted, Some(true));
        assert_eq!(response.access_tier, Some(AccessTier::Hot));
        assert_eq!(response.access_tier_inferred, Some(true));
        assert_eq!(response.archive_status, None);
        assert!(response.creation_time.is_some());
    }

    #[tokio::test]
    async fn test_get_properties_sends_request_conditions() {
        let server = MockServer::start().await;
        let since = Utc.with_ymd_and_hms(2020, 10, 20, 0, 0, 0).unwrap();
        let expected_since = format_http_date(&since);

        Mock::given(method("HEAD"))
            .and(path("/photos/cat.txt"))
            .and(move |req: &Request| {
                req.headers
                    .get("if-modified-since")
                    .and_then(|v| v.to_str().ok())
                    == Some(expected_since.as_str())
            })
            .and(header("If-Match", TEST_ETAG))
            .respond_with(blob_headers(ResponseTemplate::new(200)))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let options = BlobGetPropertiesOptions::new().conditions(
            BlobRequestConditions::new()
                .if_modified_since(since)
                .if_match(TEST_ETAG),
        );
        let response = get_properties(&client, "photos", "cat.txt", &options)
            .await
            .expect("should succeed");

        assert_eq!(response.status_code, 200);
    }

    #[tokio::test]
    async fn test_get_properties_failed_conditions() {
        let server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(header("If-None-Match", TEST_ETAG))
            .respond_with(ResponseTemplate::new(304))
            .mount(&server)
            .await;

        Mock::given(method("HEAD"))
            .and(header("If-Match", "\"garbage\""))
            .respond_with(
                ResponseTemplate::new(412).insert_header("x-ms-error-code", "ConditionNotMet"),
            )
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;

        let not_modified = BlobGetPropertiesOptions::new()
            .conditions(BlobRequestConditions::new().if_none_match(TEST_ETAG));
        let err = get_properties(&client, "photos", "cat.txt", &not_modified)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(304));

        let mismatch = BlobGetPropertiesOptions::new()
            .conditions(BlobRequestConditions::new().if_match("\"garbage\""));
        let err = get_properties(&client, "photos", "cat.txt", &mismatch)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(412));
        assert_eq!(err.error_code(), Some("ConditionNotMet"));
    }

    #[tokio::test]
    async fn test_get_properties_missing_blob() {
        let server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .respond_with(not_found())
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let err = get_properties(&client, "photos", "missing.txt", &BlobGetPropertiesOptions::new())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.error_code(), Some("BlobNotFound"));
        assert_eq!(err.request_id(), Some("req-missing"));
    }

    #[tokio::test]
    async fn test_download_whole_blob() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/photos/cat.txt"))
            .and(|req: &Request| !req.headers.contains_key("x-ms-range"))
            .respond_with(
                blob_headers(ResponseTemplate::new(200)).set_body_string(DEFAULT_DATA),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let response = download(&client, "photos", "cat.txt", &BlobDownloadOptions::new())
            .await
            .expect("should succeed");

        assert_eq!(response.status_code, 200);
        assert_eq!(&response.content[..], DEFAULT_DATA.as_bytes());
        assert_eq!(
            response.properties.content_length,
            Some(DEFAULT_DATA.len() as u64)
        );
        assert_eq!(response.properties.blob_type, Some(BlobType::BlockBlob));
    }

    #[tokio::test]
    async fn test_download_range() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/photos/cat.txt"))
            .and(header("x-ms-range", "bytes=3-4"))
            .respond_with(
                blob_headers(ResponseTemplate::new(206))
                    .insert_header("content-range", "bytes 3-4/7")
                    .set_body_string(&DEFAULT_DATA[3..5]),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let options = BlobDownloadOptions::new().range(BlobRange::new(3, Some(2)));
        let response = download(&client, "photos", "cat.txt", &options)
            .await
            .expect("should succeed");

        assert_eq!(response.status_code, 206);
        assert_eq!(&response.content[..], b"au");
        assert_eq!(
            response.properties.content_range.as_deref(),
            Some("bytes 3-4/7")
        );
    }

    #[tokio::test]
    async fn test_download_range_md5_header() {
        let server = MockServer::start().await;
        let digest = Md5::digest(&DEFAULT_DATA.as_bytes()[0..3]);

        Mock::given(method("GET"))
            .and(header("x-ms-range", "bytes=0-2"))
            .and(header("x-ms-range-get-content-md5", "true"))
            .respond_with(
                ResponseTemplate::new(206)
                    .insert_header("content-md5", STANDARD.encode(digest.as_slice()).as_str())
                    .set_body_string(&DEFAULT_DATA[0..3]),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let options = BlobDownloadOptions::new()
            .range(BlobRange::new(0, Some(3)))
            .range_get_content_md5(true);
        let response = download(&client, "photos", "cat.txt", &options)
            .await
            .expect("should succeed");

        assert_eq!(response.status_code, 206);
        assert_eq!(
            response.properties.content_md5.as_deref(),
            Some(digest.as_slice())
        );
    }

    #[tokio::test]
    async fn test_download_md5_requires_range() {
        let server = MockServer::start().await;
        let client = setup_mock_client(&server).await;

        let options = BlobDownloadOptions::new().range_get_content_md5(true);
        let err = download(&client, "photos", "cat.txt", &options)
            .await
            .unwrap_err();

        assert!(matches!(err, AzureError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_download_missing_blob() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(not_found().set_body_string(
                "<?xml version=\"1.0\" encoding=\"utf-8\"?><Error><Code>BlobNotFound</Code><Message>The specified blob does not exist.</Message></Error>",
            ))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let err = download(&client, "photos", "missing.txt", &BlobDownloadOptions::new())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.error_code(), Some("BlobNotFound"));
    }

    #[tokio::test]
    async fn test_download_stream_collects_content() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/photos/cat.txt"))
            .respond_with(
                blob_headers(ResponseTemplate::new(200)).set_body_string(DEFAULT_DATA),
            )
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let mut download = download_stream(&client, "photos", "cat.txt", &BlobDownloadOptions::new())
            .await
            .expect("should succeed");

        assert_eq!(download.status_code, 200);
        assert_eq!(download.properties.lease_state, Some(LeaseStateType::Available));

        let mut content = Vec::new();
        while let Some(chunk) = download.stream.next().await {
            content.extend_from_slice(&chunk.expect("chunk"));
        }
        assert_eq!(content, DEFAULT_DATA.as_bytes());
    }

    #[tokio::test]
    async fn test_delete_blob() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/photos/cat.txt"))
            .and(header("x-ms-delete-snapshots", "include"))
            .respond_with(blob_headers(ResponseTemplate::new(202)))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let options = BlobDeleteOptions::new().delete_snapshots(DeleteSnapshotsOption::Include);
        let response = delete(&client, "photos", "cat.txt", &options)
            .await
            .expect("should succeed");

        assert_eq!(response.status_code, 202);
        assert!(response.request_id.is_some());
        assert!(response.version.is_some());
        assert!(response.date.is_some());
    }

    #[tokio::test]
    async fn test_delete_keeps_surrounding_spaces_in_blob_name() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(|req: &Request| req.url.path() == "/photos/%20cat.txt%20")
            .respond_with(blob_headers(ResponseTemplate::new(202)))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let response = delete(&client, "photos", " cat.txt ", &BlobDeleteOptions::new())
            .await
            .expect("should succeed");

        assert_eq!(response.status_code, 202);
    }

    #[tokio::test]
    async fn test_delete_with_failed_condition() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(header("If-Match", "\"garbage\""))
            .respond_with(
                ResponseTemplate::new(412)
                    .insert_header("x-ms-error-code", "ConditionNotMet")
                    .set_body_string("<?xml version=\"1.0\" encoding=\"utf-8\"?><Error><Code>ConditionNotMet</Code><Message>The condition specified using HTTP conditional header(s) is not met.</Message></Error>"),
            )
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let options = BlobDeleteOptions::new()
            .conditions(BlobRequestConditions::new().if_match("\"garbage\""));
        let err = delete(&client, "photos", "cat.txt", &options)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(412));
        assert_eq!(err.error_code(), Some("ConditionNotMet"));
    }

    #[tokio::test]
    async fn test_empty_blob_name_is_rejected() {
        let server = MockServer::start().await;
        let client = setup_mock_client(&server).await;

        let err = delete(&client, "photos", "", &BlobDeleteOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AzureError::InvalidArgument(_)));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_download_emits_span() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(DEFAULT_DATA))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        download(&client, "photos", "cat.txt", &BlobDownloadOptions::new())
            .await
            .expect("should succeed");

        assert!(logs_contain("azure::storage::blob::download"));
        assert!(logs_contain("blob downloaded"));
    }
}
