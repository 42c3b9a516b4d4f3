//! Request and response types for chat participant operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// A Communication Services user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationUserIdentifierModel {
    /// The user ID, e.g. `8:acs:...`.
    pub id: String,
}

/// A phone number participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumberIdentifierModel {
    /// E.164 phone number, e.g. `+14255550123`.
    pub value: String,
}

/// Identifies a communication participant.
///
/// At most one of the typed identifiers is set; `raw_id` is the canonical
/// string form of whichever is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationIdentifierModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub communication_user: Option<CommunicationUserIdentifierModel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<PhoneNumberIdentifierModel>,
}

impl CommunicationIdentifierModel {
    /// Identifier of a Communication Services user.
    pub fn communication_user(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            raw_id: Some(id.clone()),
            communication_user: Some(CommunicationUserIdentifierModel { id }),
            phone_number: None,
        }
    }

    /// Identifier of a phone number.
    pub fn phone_number(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            raw_id: Some(format!("4:{value}")),
            communication_user: None,
            phone_number: Some(PhoneNumberIdentifierModel { value }),
        }
    }

    /// Whether no identifier is set at all.
    pub fn is_empty(&self) -> bool {
        self.raw_id.as_deref().unwrap_or_default().is_empty()
            && self.communication_user.is_none()
            && self.phone_number.is_none()
    }
}

// ---------------------------------------------------------------------------
// Participants
// ---------------------------------------------------------------------------

/// A member of a chat thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatParticipant {
    pub communication_identifier: CommunicationIdentifierModel,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Time from which the chat history is shared with the participant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_history_time: Option<DateTime<Utc>>,
}

impl ChatParticipant {
    pub fn new(communication_identifier: CommunicationIdentifierModel) -> Self {
        Self {
            communication_identifier,
            display_name: None,
            share_history_time: None,
        }
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn share_history_time(mut self, time: DateTime<Utc>) -> Self {
        self.share_history_time = Some(time);
        self
    }
}

/// Participants to add to a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddChatParticipantsRequest {
    pub participants: Vec<ChatParticipant>,
}

impl AddChatParticipantsRequest {
    pub fn new(participants: impl IntoIterator<Item = ChatParticipant>) -> Self {
        Self {
            participants: participants.into_iter().collect(),
        }
    }
}

/// Result of adding participants.
///
/// The request succeeds as a whole even when some participants are rejected;
/// those are listed in `invalid_participants`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChatParticipantsResult {
    #[serde(default)]
    pub invalid_participants: Vec<CommunicationError>,
}

impl AddChatParticipantsResult {
    /// `Ok` when every participant was added, otherwise the rejections.
    pub fn into_result(self) -> Result<(), AddChatParticipantsErrors> {
        if self.invalid_participants.is_empty() {
            Ok(())
        } else {
            Err(AddChatParticipantsErrors {
                invalid_participants: self.invalid_participants,
            })
        }
    }
}

/// Participants that failed to be added to a chat thread.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{} participant(s) could not be added", .invalid_participants.len())]
pub struct AddChatParticipantsErrors {
    pub invalid_participants: Vec<CommunicationError>,
}

/// One page of thread participants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatParticipantsCollection {
    #[serde(default)]
    pub value: Vec<ChatParticipant>,

    /// Link to the next page, absent on the last page.
    pub next_link: Option<String>,
}

/// Paging options for listing participants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParticipantsOptions {
    pub max_page_size: Option<u32>,
    pub skip: Option<u32>,
}

impl ListParticipantsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = Some(max_page_size);
        self
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// An error reported by Communication Services.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommunicationError {
    pub code: String,
    pub message: String,

    /// The element the error refers to, e.g. a participant's raw ID.
    pub target: Option<String>,

    #[serde(default)]
    pub details: Vec<CommunicationError>,

    #[serde(rename = "innererror")]
    pub inner_error: Option<Box<CommunicationError>>,
}

impl fmt::Display for CommunicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            Some(target) => write!(f, "{} ({}): {}", self.code, target, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}
