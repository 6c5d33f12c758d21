//! Chat message router.
//!
//! A pure function of (message, session). In the normal state the message is
//! classified by an ordered rule list: empty, scheduler, contact, FAQ,
//! fallback. Once contact intent is seen the router waits for an email
//! address and keeps asking until it gets one.

use crate::faq::{self, FaqEntry};
use crate::keywords::{contains_any, looks_like_email, CONTACT_KEYWORDS, SCHEDULER_KEYWORDS};
use crate::types::{ChatSession, ContactForwardPayload, RouteResult};

const EMPTY_PROMPT: &str = "Could you share a bit more about what you need? I can answer \
     questions about our services, set up a call, or connect you with someone on the team.";

const SCHEDULER_REPLY: &str = "Happy to set that up. I'm opening our scheduling calendar \
     so you can pick a time that works for you.";

const CONTACT_PROMPT: &str = "I'd be glad to connect you with our team. What's the best \
     email address to reach you at?";

const EMAIL_REPROMPT: &str = "Please share the email address where our team can reach you.";

const EMAIL_INVALID: &str = "That doesn't look like a valid email address. Could you \
     double-check it and try again?";

const FALLBACK_REPLY: &str = "I'm not sure I caught that. You can ask about our services \
     and pricing, schedule a call with a consultant, or ask to talk to a person on our team.";

/// What a normal-state message is asking for.
#[derive(Debug, Clone, Copy)]
pub enum Intent {
    Empty,
    Scheduler,
    Contact,
    Faq(&'static FaqEntry),
    Fallback,
}

impl PartialEq for Intent {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Intent::Faq(a), Intent::Faq(b)) => a.topic == b.topic,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

/// The session every new conversation starts from.
pub fn create_default_session() -> ChatSession {
    ChatSession::default()
}

/// Classify a trimmed message. First matching rule wins.
pub fn classify(text: &str) -> Intent {
    if text.is_empty() {
        return Intent::Empty;
    }

    let lowered = text.to_lowercase();

    if contains_any(&lowered, SCHEDULER_KEYWORDS) {
        return Intent::Scheduler;
    }
    if contains_any(&lowered, CONTACT_KEYWORDS) {
        return Intent::Contact;
    }
    if let Some(entry) = faq::lookup(&lowered) {
        return Intent::Faq(entry);
    }

    Intent::Fallback
}

/// Route one visitor message against the current session.
///
/// Never fails: a missing or blank message is answered with a prompt.
pub fn route(message: Option<&str>, session: &ChatSession) -> RouteResult {
    let text = message.map(str::trim).unwrap_or_default();

    if session.awaiting_contact_email {
        route_awaiting_email(text, session)
    } else {
        route_normal(text, session)
    }
}

fn route_normal(text: &str, session: &ChatSession) -> RouteResult {
    match classify(text) {
        Intent::Empty => RouteResult::reply(EMPTY_PROMPT, session.clone()),
        Intent::Scheduler => RouteResult {
            replies: vec![SCHEDULER_REPLY.to_string()],
            session: session.with_scheduler_opened(),
            // Edge-triggered: only the first opening signals the UI.
            open_scheduler: (!session.has_opened_scheduler).then_some(true),
            forward_contact: None,
        },
        Intent::Contact => RouteResult::reply(CONTACT_PROMPT, session.awaiting_email(text)),
        Intent::Faq(entry) => RouteResult::reply(entry.answer, session.clone()),
        Intent::Fallback => RouteResult::reply(FALLBACK_REPLY, session.clone()),
    }
}

fn route_awaiting_email(text: &str, session: &ChatSession) -> RouteResult {
    if text.is_empty() {
        return RouteResult::reply(EMAIL_REPROMPT, session.clone());
    }
    if !looks_like_email(text) {
        return RouteResult::reply(EMAIL_INVALID, session.clone());
    }

    let summary = session.pending_contact_summary.clone().unwrap_or_default();
    RouteResult {
        replies: vec![format!(
            "Thanks! I've passed your note along, and someone from our team will follow up \
             at {} shortly.",
            text
        )],
        session: session.contact_captured(),
        open_scheduler: None,
        forward_contact: Some(ContactForwardPayload::from_chat(text, summary)),
    }
}
