//! Chat thread participant operations.
//!
//! ## Example
//!
//! ```rust,no_run
//! use azure_rest_core::client::ServiceClient;
//! use azure_communication_chat::models::ListParticipantsOptions;
//! use azure_communication_chat::participants;
//!
//! # async fn example(client: &ServiceClient) -> azure_rest_core::error::AzureResult<()> {
//! // Walk every page of participants
//! let mut skip = 0;
//! loop {
//!     let options = ListParticipantsOptions::new().max_page_size(50).skip(skip);
//!     let page = participants::list(client, "19:abc@thread.v2", &options)
//!         .await?
//!         .into_inner();
//!     skip += page.value.len() as u32;
//!     if page.next_link.is_none() || page.value.is_empty() {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use crate::models::{
    AddChatParticipantsRequest, AddChatParticipantsResult, ChatParticipantsCollection,
    CommunicationIdentifierModel, ListParticipantsOptions,
};
use crate::thread_operation;
use azure_rest_core::client::ServiceClient;
use azure_rest_core::error::{require_non_empty, AzureError, AzureResult};
use azure_rest_core::response::ServiceResponse;
use reqwest::{Method, StatusCode};

/// Add participants to a chat thread.
///
/// Participants the service rejects are reported in the result rather than as
/// an error; see [`AddChatParticipantsResult::into_result`].
///
/// # Tracing
///
/// Emits a span named `azure::chat::participants::add` with field `thread_id`.
#[tracing::instrument(
    name = "azure::chat::participants::add",
    skip(client, request),
    fields(thread_id = %thread_id)
)]
pub async fn add(
    client: &ServiceClient,
    thread_id: &str,
    request: &AddChatParticipantsRequest,
) -> AzureResult<ServiceResponse<AddChatParticipantsResult>> {
    require_non_empty("thread_id", thread_id)?;
    if request.participants.is_empty() {
        return Err(AzureError::InvalidArgument(
            "participants cannot be empty".into(),
        ));
    }

    tracing::debug!(count = request.participants.len(), "adding participants");

    let op = thread_operation(client, Method::POST, thread_id, &["participants", ":add"])
        .json_body(request)?
        .expect(StatusCode::CREATED);

    let response = client.execute(op).await?;
    let result: AddChatParticipantsResult = if response.body().is_empty() {
        AddChatParticipantsResult::default()
    } else {
        response.json()?
    };

    if !result.invalid_participants.is_empty() {
        tracing::warn!(
            rejected = result.invalid_participants.len(),
            "some participants could not be added"
        );
    }
    Ok(response.into_response(result))
}

/// List one page of a chat thread's participants.
///
/// # Tracing
///
/// Emits a span named `azure::chat::participants::list` with field `thread_id`.
#[tracing::instrument(
    name = "azure::chat::participants::list",
    skip(client, options),
    fields(thread_id = %thread_id)
)]
pub async fn list(
    client: &ServiceClient,
    thread_id: &str,
    options: &ListParticipantsOptions,
) -> AzureResult<ServiceResponse<ChatParticipantsCollection>> {
    require_non_empty("thread_id", thread_id)?;

    tracing::debug!("listing participants");

    let op = thread_operation(client, Method::GET, thread_id, &["participants"])
        .query_opt("maxPageSize", options.max_page_size.map(|n| n.to_string()))
        .query_opt("skip", options.skip.map(|n| n.to_string()))
        .expect(StatusCode::OK);

    let response = client.execute(op).await?;
    let page: ChatParticipantsCollection = response.json()?;

    tracing::debug!(count = page.value.len(), more = page.next_link.is_some(), "participants listed");
    Ok(response.into_response(page))
}

/// Remove a participant from a chat thread.
///
/// # Tracing
///
/// Emits a span named `azure::chat::participants::remove` with field `thread_id`.
#[tracing::instrument(
    name = "azure::chat::participants::remove",
    skip(client, participant),
    fields(thread_id = %thread_id)
)]
pub async fn remove(
    client: &ServiceClient,
    thread_id: &str,
    participant: &CommunicationIdentifierModel,
) -> AzureResult<ServiceResponse<()>> {
    require_non_empty("thread_id", thread_id)?;
    if participant.is_empty() {
        return Err(AzureError::InvalidArgument(
            "participant identifier cannot be empty".into(),
        ));
    }

    tracing::debug!(participant = ?participant.raw_id, "removing participant");

    let op = thread_operation(client, Method::POST, thread_id, &["participants", ":remove"])
        .json_body(participant)?
        .expect(StatusCode::NO_CONTENT);

    let response = client.execute(op).await?;
    Ok(response.into_response(()))
}
