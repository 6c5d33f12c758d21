//! Chat session coercion.
//!
//! The chat widget echoes back whatever session it was last given, so the
//! value arriving here is untrusted. Anything of the wrong type falls back to
//! the default for that field.

use meridian_chat::ChatSession;
use serde_json::Value;

/// Build a [`ChatSession`] from client-supplied JSON.
///
/// Booleans count only when they are JSON booleans. A pending summary is kept
/// only when it is a string and the session is waiting for an email, so a
/// summary never outlives the capture flow it belongs to.
pub fn coerce_session(value: &Value) -> ChatSession {
    let Some(obj) = value.as_object() else {
        return ChatSession::default();
    };

    let flag = |key: &str| obj.get(key).and_then(Value::as_bool).unwrap_or(false);
    let awaiting_contact_email = flag("awaitingContactEmail");
    let pending_contact_summary = if awaiting_contact_email {
        obj.get("pendingContactSummary")
            .and_then(Value::as_str)
            .map(str::to_string)
    } else {
        None
    };

    ChatSession {
        has_opened_scheduler: flag("hasOpenedScheduler"),
        awaiting_contact_email,
        pending_contact_summary,
    }
}
