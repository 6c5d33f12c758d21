//! Value types exchanged with the chat router.
//!
//! Field names serialize in camelCase so the JSON matches what the site's
//! chat widget already sends and expects.

use serde::{Deserialize, Serialize};

/// Origin tag attached to contacts captured by the chat assistant.
pub const CHAT_ASSISTANT_SOURCE: &str = "chat-assistant";

/// Per-conversation state the caller persists between router calls.
///
/// `pending_contact_summary` is `Some` exactly when `awaiting_contact_email`
/// is true. The transition helpers below are the only places that change
/// either field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatSession {
    /// Set the first time the scheduler is surfaced. Never cleared.
    pub has_opened_scheduler: bool,
    /// The next message is expected to be an email address.
    pub awaiting_contact_email: bool,
    /// The message that started contact capture.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_contact_summary: Option<String>,
}

impl ChatSession {
    /// Session with the scheduler marked as opened.
    pub fn with_scheduler_opened(&self) -> Self {
        Self {
            has_opened_scheduler: true,
            ..self.clone()
        }
    }

    /// Session waiting for an email, remembering what the visitor asked for.
    pub fn awaiting_email(&self, summary: impl Into<String>) -> Self {
        Self {
            has_opened_scheduler: self.has_opened_scheduler,
            awaiting_contact_email: true,
            pending_contact_summary: Some(summary.into()),
        }
    }

    /// Session after an email was captured: back to normal routing.
    pub fn contact_captured(&self) -> Self {
        Self {
            has_opened_scheduler: self.has_opened_scheduler,
            awaiting_contact_email: false,
            pending_contact_summary: None,
        }
    }
}

/// A captured contact request, handed to the downstream follow-up channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForwardPayload {
    /// Address as typed by the visitor (trimmed, case preserved).
    pub email: String,
    /// The message that expressed contact intent.
    pub summary: String,
    pub source: String,
}

impl ContactForwardPayload {
    pub fn from_chat(email: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            summary: summary.into(),
            source: CHAT_ASSISTANT_SOURCE.to_string(),
        }
    }
}

/// Output of a single routing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    /// Assistant messages to display, in order. Never empty.
    pub replies: Vec<String>,
    pub session: ChatSession,
    /// `Some(true)` only on the call that first opens the scheduler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_scheduler: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_contact: Option<ContactForwardPayload>,
}

impl RouteResult {
    /// A single reply with no side-effect signals.
    pub fn reply(text: impl Into<String>, session: ChatSession) -> Self {
        Self {
            replies: vec![text.into()],
            session,
            open_scheduler: None,
            forward_contact: None,
        }
    }
}
