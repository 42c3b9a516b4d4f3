//! # Azure Communication Chat
//!
//! Chat thread participant operations for Azure Communication Services.
//!
//! The client endpoint is the Communication Services resource
//! (`https://<resource>.communication.azure.com`), authenticated with a user
//! access token.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use azure_rest_core::auth::AzureCredential;
//! use azure_rest_core::client::ServiceClient;
//! use azure_communication_chat::models::{
//!     AddChatParticipantsRequest, ChatParticipant, CommunicationIdentifierModel,
//!     ListParticipantsOptions,
//! };
//! use azure_communication_chat::participants;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ServiceClient::builder()
//!         .endpoint("https://my-resource.communication.azure.com")
//!         .credential(AzureCredential::bearer("user-access-token"))
//!         .build()?;
//!
//!     let thread_id = "19:abc@thread.v2";
//!     let bob = CommunicationIdentifierModel::communication_user("8:acs:bob");
//!     let request = AddChatParticipantsRequest::new([ChatParticipant::new(bob.clone()).display_name("Bob")]);
//!     participants::add(&client, thread_id, &request).await?.into_inner().into_result()?;
//!
//!     let page = participants::list(&client, thread_id, &ListParticipantsOptions::new())
//!         .await?
//!         .into_inner();
//!     for participant in &page.value {
//!         println!("{:?}", participant.display_name);
//!     }
//!
//!     participants::remove(&client, thread_id, &bob).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`participants`] - Add, list, and remove chat thread participants
//! - [`models`] - Participants, identifiers and error payloads

use azure_rest_core::client::ServiceClient;
use azure_rest_core::operation::RestOperation;
use reqwest::Method;

pub mod models;
pub mod participants;

/// Chat API version used unless the client overrides it.
pub const API_VERSION: &str = "2021-09-07";

/// Start an operation on `/chat/threads/{thread_id}/...`.
///
/// Communication Services takes its version as the `api-version` query parameter.
pub(crate) fn thread_operation(
    client: &ServiceClient,
    method: Method,
    thread_id: &str,
    segments: &[&str],
) -> RestOperation {
    let op = RestOperation::new(method, ["chat", "threads", thread_id])
        .query("api-version", client.api_version().unwrap_or(API_VERSION));
    segments.iter().fold(op, |op, s| op.segment(s))
}

#[cfg(test)]
pub(crate) mod test_utils {
    pub use azure_rest_core::test_support::setup_mock_client;

    /// Thread ID used across tests.
    pub const TEST_THREAD_ID: &str = "19:a1b2c3@thread.v2";

    /// Path of a thread resource in tests.
    pub fn thread_path(rest: &str) -> String {
        format!("/chat/threads/{TEST_THREAD_ID}/{rest}")
    }
}
