//! Keyword tables and the email shape check.
//!
//! Matching is plain substring containment on lower-cased text, not word
//! matching: "bookkeeping" contains "book" and routes to the scheduler.

use regex::Regex;
use std::sync::LazyLock;

/// Words that mean "I want to book time with you".
pub const SCHEDULER_KEYWORDS: &[&str] = &["schedule", "book", "calendar", "call", "meeting"];

/// Words that mean "put me in touch with a person".
pub const CONTACT_KEYWORDS: &[&str] = &[
    "contact",
    "reach out",
    "email me",
    "talk to",
    "speak with",
    "human",
    "person",
    "sales",
];

// local@domain.tld shape only, not RFC 5322.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("Invalid email regex"));

/// True if `haystack` contains any of `needles`.
///
/// `haystack` must already be lower-cased; the tables are.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// True if the whole of `text` is shaped like `local@domain.tld`.
pub fn looks_like_email(text: &str) -> bool {
    EMAIL_RE.is_match(text)
}
