//! Rule-based chat assistant for the Meridian site.
//!
//! Routes a visitor's message through a fixed keyword decision table and a
//! two-state contact-capture machine. The router is pure: callers own the
//! [`ChatSession`] and thread it through every call.

pub mod faq;
pub mod keywords;
pub mod router;
pub mod types;

pub use faq::{FaqEntry, FaqTopic, FAQ_TABLE};
pub use keywords::looks_like_email;
pub use router::{classify, create_default_session, route, Intent};
pub use types::{ChatSession, ContactForwardPayload, RouteResult, CHAT_ASSISTANT_SOURCE};
