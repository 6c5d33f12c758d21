//! Lead capture for the Meridian site.
//!
//! Every way a visitor can leave their details (chat contact capture, the
//! contact form, newsletter signup, white-paper downloads) ends up as a
//! validated [`Lead`] handed to a [`LeadSink`].

pub mod error;
pub mod forms;
pub mod sink;
pub mod types;

pub use error::LeadError;
pub use forms::{ContactForm, NewsletterSignup, WhitePaperRequest};
pub use sink::{LeadSink, LogSink, MemorySink};
pub use types::{Lead, LeadKind};
