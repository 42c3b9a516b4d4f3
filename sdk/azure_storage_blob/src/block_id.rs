//! Block IDs.
//!
//! The service requires block IDs to be base64 strings, and all IDs within a
//! blob to have the same encoded length.

use azure_rest_core::error::{AzureError, AzureResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Base64-encode raw block ID bytes.
pub fn encode(raw: impl AsRef<[u8]>) -> String {
    STANDARD.encode(raw)
}

/// Decode a block ID back to its raw bytes.
pub fn decode(block_id: &str) -> AzureResult<Vec<u8>> {
    STANDARD
        .decode(block_id)
        .map_err(|e| AzureError::InvalidArgument(format!("invalid block id '{block_id}': {e}")))
}

/// A fixed-width block ID for the `index`-th block of a blob.
///
/// ```
/// use azure_storage_blob::block_id;
///
/// assert_eq!(block_id::from_index(0).len(), block_id::from_index(u64::MAX).len());
/// ```
pub fn from_index(index: u64) -> String {
    encode(format!("block-{index:020}"))
}
