//! Canned answers for common questions.
//!
//! Entries are checked in table order and the first whose keywords appear in
//! the message wins, so a message about "AI audit pricing" gets the pricing
//! answer.

use std::fmt;

/// Topics covered by the FAQ table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaqTopic {
    Services,
    Pricing,
    Audits,
    Ai,
}

impl fmt::Display for FaqTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaqTopic::Services => write!(f, "services"),
            FaqTopic::Pricing => write!(f, "pricing"),
            FaqTopic::Audits => write!(f, "audits"),
            FaqTopic::Ai => write!(f, "ai"),
        }
    }
}

/// One row of the FAQ table.
#[derive(Debug)]
pub struct FaqEntry {
    pub topic: FaqTopic,
    /// Lower-case substrings that select this entry.
    pub keywords: &'static [&'static str],
    pub answer: &'static str,
}

pub static FAQ_TABLE: &[FaqEntry] = &[
    FaqEntry {
        topic: FaqTopic::Services,
        keywords: &["service", "offer", "what do you do", "help with", "expertise"],
        answer: "We help growth-stage companies with operations strategy, technology \
                 roadmaps, and data and AI adoption. Engagements range from focused \
                 assessments to multi-month transformation programs.",
    },
    FaqEntry {
        topic: FaqTopic::Pricing,
        keywords: &["price", "pricing", "cost", "budget", "fees", "how much"],
        answer: "Most engagements are scoped as fixed-fee projects after a free discovery \
                 call. Assessments start in the low five figures, and ongoing advisory \
                 retainers are billed monthly.",
    },
    FaqEntry {
        topic: FaqTopic::Audits,
        keywords: &["audit", "assessment", "review", "diagnostic"],
        answer: "Our assessments run two to four weeks. We interview stakeholders, review \
                 your systems and processes, and deliver a prioritized roadmap of quick \
                 wins and longer-term bets.",
    },
    FaqEntry {
        topic: FaqTopic::Ai,
        keywords: &[
            " ai",
            "ai ",
            "artificial intelligence",
            "machine learning",
            "llm",
            "genai",
        ],
        answer: "We help teams find the AI use cases that actually pay off, from document \
                 automation to forecasting, and then build the data foundations and \
                 guardrails to run them in production.",
    },
];

/// First FAQ entry whose keywords appear in `lowered`.
///
/// The message is padded with a space on each side so space-delimited
/// keywords like `" ai"` also hit at the very start or end of a message.
pub fn lookup(lowered: &str) -> Option<&'static FaqEntry> {
    let padded = format!(" {} ", lowered);
    FAQ_TABLE
        .iter()
        .find(|entry| crate::keywords::contains_any(&padded, entry.keywords))
}
