//! Integration tests for azure_storage_blob.
//!
//! These tests require a live storage account.
//! Run with: `cargo test --features integration-tests`
//!
//! Required environment variables:
//! - `AZURE_SERVICE_ENDPOINT`: The blob endpoint, e.g. `https://myaccount.blob.core.windows.net`
//! - `AZURE_STORAGE_SAS_TOKEN`: An account SAS with read, write and delete permissions

#![cfg(feature = "integration-tests")]

use azure_rest_core::auth::{AzureCredential, STORAGE_SCOPE};
use azure_rest_core::client::ServiceClient;
use azure_storage_blob::models::{
    AccessTier, BlobDeleteOptions, BlobDownloadOptions, BlobGetPropertiesOptions, BlobRange,
    BlobRequestConditions, BlobType, LeaseStateType, LeaseStatusType,
};
use azure_storage_blob::{blob, block_id, container};
use bytes::Bytes;
use md5::{Digest, Md5};
use std::time::{SystemTime, UNIX_EPOCH};

const DEFAULT_DATA: &str = "default";

fn get_client() -> ServiceClient {
    ServiceClient::builder()
        .credential(AzureCredential::from_env_with_scope(STORAGE_SCOPE).expect("credential"))
        .build()
        .expect("Failed to build client")
}

fn unique_name(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    format!("{prefix}{nanos}")
}

/// A container holding one committed blob with `DEFAULT_DATA`.
struct Fixture {
    client: ServiceClient,
    container: String,
    blob: String,
}

impl Fixture {
    async fn setup() -> Self {
        let client = get_client();
        let container = unique_name("jtc");
        let blob = unique_name("javablob");

        container::create(&client, &container)
            .await
            .expect("create container");

        let id = block_id::from_index(0);
        blob::stage_block(
            &client,
            &container,
            &blob,
            &id,
            Bytes::from_static(DEFAULT_DATA.as_bytes()),
        )
        .await
        .expect("stage block");
        blob::commit_block_list(&client, &container, &blob, &[id], false)
            .await
            .expect("commit block list");

        Self {
            client,
            container,
            blob,
        }
    }

    async fn teardown(self) {
        container::delete(&self.client, &self.container)
            .await
            .expect("delete container");
    }
}

#[tokio::test]
async fn test_get_properties_default() {
    let fixture = Fixture::setup().await;

    let props = blob::get_properties(
        &fixture.client,
        &fixture.container,
        &fixture.blob,
        &BlobGetPropertiesOptions::new(),
    )
    .await
    .expect("get properties");

    assert_eq!(props.status_code, 200);
    assert!(props.etag.is_some());
    assert!(props.last_modified.is_some());
    assert!(props.request_id.is_some());
    assert!(props.version.is_some());
    assert!(props.date.is_some());
    assert!(props.metadata.is_empty());
    assert_eq!(props.blob_type, Some(BlobType::BlockBlob));
    assert!(props.copy_completion_time.is_none());
    assert!(props.copy_status_description.is_none());
    assert!(props.copy_id.is_none());
    assert!(props.copy_progress.is_none());
    assert!(props.copy_source.is_none());
    assert!(props.copy_status.is_none());
    assert!(props.is_incremental_copy.is_none());
    assert!(props.destination_snapshot.is_none());
    assert!(props.lease_duration.is_none());
    assert_eq!(props.lease_state, Some(LeaseStateType::Available));
    assert_eq!(props.lease_status, Some(LeaseStatusType::Unlocked));
    assert!(props.content_length.is_some());
    assert!(props.content_type.is_some());
    assert!(props.content_md5.is_some());
    assert!(props.content_encoding.is_none());
    assert!(props.content_disposition.is_none());
    assert!(props.content_language.is_none());
    assert!(props.cache_control.is_none());
    assert!(props.blob_sequence_number.is_none());
    assert_eq!(props.accept_ranges.as_deref(), Some("bytes"));
    assert!(props.blob_committed_block_count.is_none());
    assert_eq!(props.is_server_encrypted, Some(true));
    assert!(props.encryption_key_sha256.is_none());
    assert_eq!(props.access_tier, Some(AccessTier::Hot));
    assert_eq!(props.access_tier_inferred, Some(true));
    assert!(props.archive_status.is_none());
    assert!(props.creation_time.is_some());

    fixture.teardown().await;
}

#[tokio::test]
async fn test_get_properties_failed_if_match() {
    let fixture = Fixture::setup().await;

    let options = BlobGetPropertiesOptions::new()
        .conditions(BlobRequestConditions::new().if_match("\"garbage\""));
    let err = blob::get_properties(&fixture.client, &fixture.container, &fixture.blob, &options)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(412));

    fixture.teardown().await;
}

#[tokio::test]
async fn test_get_properties_not_modified() {
    let fixture = Fixture::setup().await;

    let etag = blob::get_properties(
        &fixture.client,
        &fixture.container,
        &fixture.blob,
        &BlobGetPropertiesOptions::new(),
    )
    .await
    .expect("get properties")
    .into_inner()
    .etag
    .expect("etag");

    let options =
        BlobGetPropertiesOptions::new().conditions(BlobRequestConditions::new().if_none_match(etag));
    let err = blob::get_properties(&fixture.client, &fixture.container, &fixture.blob, &options)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(304));

    fixture.teardown().await;
}

#[tokio::test]
async fn test_get_properties_missing_blob() {
    let fixture = Fixture::setup().await;

    let err = blob::get_properties(
        &fixture.client,
        &fixture.container,
        &unique_name("missing"),
        &BlobGetPropertiesOptions::new(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.error_code(), Some("BlobNotFound"));

    fixture.teardown().await;
}

#[tokio::test]
async fn test_download_all() {
    let fixture = Fixture::setup().await;

    let response = blob::download(
        &fixture.client,
        &fixture.container,
        &fixture.blob,
        &BlobDownloadOptions::new(),
    )
    .await
    .expect("download");

    assert_eq!(response.status_code, 200);
    assert_eq!(&response.content[..], DEFAULT_DATA.as_bytes());

    fixture.teardown().await;
}

#[tokio::test]
async fn test_download_range_with_md5() {
    let fixture = Fixture::setup().await;

    let options = BlobDownloadOptions::new()
        .range(BlobRange::new(0, Some(3)))
        .range_get_content_md5(true);
    let response = blob::download(&fixture.client, &fixture.container, &fixture.blob, &options)
        .await
        .expect("download range");

    assert_eq!(response.status_code, 206);
    assert_eq!(&response.content[..], b"def");

    let expected = Md5::digest(&DEFAULT_DATA.as_bytes()[..3]);
    assert_eq!(
        response.properties.content_md5.as_deref(),
        Some(expected.as_slice())
    );

    fixture.teardown().await;
}

#[tokio::test]
async fn test_download_stream() {
    use futures::TryStreamExt;

    let fixture = Fixture::setup().await;

    let download = blob::download_stream(
        &fixture.client,
        &fixture.container,
        &fixture.blob,
        &BlobDownloadOptions::new(),
    )
    .await
    .expect("download stream");
    let chunks: Vec<Bytes> = download.stream.try_collect().await.expect("read stream");

    assert_eq!(chunks.concat(), DEFAULT_DATA.as_bytes());

    fixture.teardown().await;
}

#[tokio::test]
async fn test_delete_blob() {
    let fixture = Fixture::setup().await;

    let response = blob::delete(
        &fixture.client,
        &fixture.container,
        &fixture.blob,
        &BlobDeleteOptions::new(),
    )
    .await
    .expect("delete blob");
    assert_eq!(response.status_code, 202);
    assert!(response.request_id.is_some());

    fixture.teardown().await;
}
