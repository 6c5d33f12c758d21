//! Lead records.

use std::fmt;

use chrono::{DateTime, Utc};
use meridian_chat::ContactForwardPayload;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a lead reached us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadKind {
    ChatContact,
    ContactForm,
    Newsletter,
    WhitePaper,
}

impl fmt::Display for LeadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeadKind::ChatContact => write!(f, "chat_contact"),
            LeadKind::ContactForm => write!(f, "contact_form"),
            LeadKind::Newsletter => write!(f, "newsletter"),
            LeadKind::WhitePaper => write!(f, "white_paper"),
        }
    }
}

/// A visitor who left their details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub kind: LeadKind,
    pub email: String,
    pub name: Option<String>,
    pub company: Option<String>,
    /// What the visitor asked about.
    pub summary: String,
    /// Origin tag for downstream routing, e.g. "chat-assistant".
    pub source: String,
    pub received_at: DateTime<Utc>,
}

impl Lead {
    pub(crate) fn new(kind: LeadKind, source: &str, email: String, summary: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            email,
            name: None,
            company: None,
            summary,
            source: source.to_string(),
            received_at: Utc::now(),
        }
    }

    /// Lead for a contact captured by the chat assistant.
    pub fn from_chat(payload: &ContactForwardPayload) -> Self {
        Self::new(
            LeadKind::ChatContact,
            &payload.source,
            payload.email.clone(),
            payload.summary.clone(),
        )
    }

    /// Domain part of the email, for logging without the full address.
    pub fn email_domain(&self) -> &str {
        self.email
            .rsplit_once('@')
            .map(|(_, domain)| domain)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_kind_display_matches_wire_name() {
        for kind in [
            LeadKind::ChatContact,
            LeadKind::ContactForm,
            LeadKind::Newsletter,
            LeadKind::WhitePaper,
        ] {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.to_string());
        }
    }

    #[test]
    fn test_lead_kind_serializes_snake_case() {
        let value = serde_json::to_value(LeadKind::WhitePaper).unwrap();
        assert_eq!(value, "white_paper");
    }

    #[test]
    fn test_from_chat_copies_payload() {
        let payload = ContactForwardPayload::from_chat("Pat@Example.com", "talk to sales");
        let lead = Lead::from_chat(&payload);
        assert_eq!(lead.kind, LeadKind::ChatContact);
        assert_eq!(lead.email, "Pat@Example.com");
        assert_eq!(lead.summary, "talk to sales");
        assert_eq!(lead.source, "chat-assistant");
        assert!(lead.name.is_none());
        assert!(lead.company.is_none());
    }

    #[test]
    fn test_from_chat_assigns_fresh_ids() {
        let payload = ContactForwardPayload::from_chat("a@b.co", "");
        assert_ne!(Lead::from_chat(&payload).id, Lead::from_chat(&payload).id);
    }

    #[test]
    fn test_email_domain() {
        let payload = ContactForwardPayload::from_chat("a@b@corp.example", "");
        assert_eq!(Lead::from_chat(&payload).email_domain(), "corp.example");

        let payload = ContactForwardPayload::from_chat("no-at-sign", "");
        assert_eq!(Lead::from_chat(&payload).email_domain(), "");
    }
}
