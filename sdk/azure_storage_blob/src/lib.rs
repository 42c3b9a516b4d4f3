//! # Azure Storage Blob
//!
//! Block blob operations for Azure Blob Storage.
//!
//! The client endpoint is the account's blob endpoint
//! (`https://<account>.blob.core.windows.net`); authenticate with a shared
//! access signature, a storage-scoped token credential, or anonymously for
//! public containers.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use azure_rest_core::auth::AzureCredential;
//! use azure_rest_core::client::ServiceClient;
//! use azure_storage_blob::models::{BlobDownloadOptions, BlobRange};
//! use azure_storage_blob::{blob, block_id, container};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ServiceClient::builder()
//!         .endpoint("https://myaccount.blob.core.windows.net")
//!         .credential(AzureCredential::sas("sv=2019-12-12&ss=b&srt=sco&sp=rwdlac&sig=..."))
//!         .build()?;
//!
//!     container::create(&client, "photos").await?;
//!
//!     let id = block_id::from_index(0);
//!     blob::stage_block(&client, "photos", "2024/cat.txt", &id, "meow".into()).await?;
//!     blob::commit_block_list(&client, "photos", "2024/cat.txt", &[id], false).await?;
//!
//!     let options = BlobDownloadOptions::new().range(BlobRange::new(0, Some(2)));
//!     let download = blob::download(&client, "photos", "2024/cat.txt", &options).await?;
//!     assert_eq!(&download.content[..], b"me");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`container`] - Create and delete containers
//! - [`blob`] - Stage and commit blocks, read properties, download and delete blobs
//! - [`block_id`] - Block ID encoding
//! - [`models`] - Options, request conditions and response headers

use azure_rest_core::client::ServiceClient;
use azure_rest_core::operation::RestOperation;
use azure_rest_core::time::format_http_date;
use chrono::Utc;
use reqwest::Method;

pub mod blob;
pub mod block_id;
pub mod container;
pub mod models;

/// Storage service version used unless the client overrides it.
pub const API_VERSION: &str = "2019-12-12";

/// Start a storage operation with the version and date headers every request carries.
pub(crate) fn storage_operation<I, S>(client: &ServiceClient, method: Method, segments: I) -> RestOperation
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    RestOperation::new(method, segments)
        .header("x-ms-version", client.api_version().unwrap_or(API_VERSION))
        .header("x-ms-date", format_http_date(&Utc::now()))
}

/// Path segments of a blob. Virtual directories in the blob name become
/// separate segments so their `/` separators are kept.
pub(crate) fn blob_segments<'a>(container: &'a str, blob: &'a str) -> Vec<&'a str> {
    std::iter::once(container).chain(blob.split('/')).collect()
}
