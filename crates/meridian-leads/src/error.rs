//! Error types for lead capture.

/// Errors from lead validation and delivery.
#[derive(Debug, thiserror::Error)]
pub enum LeadError {
    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("Unknown white paper: {0}")]
    UnknownPaper(String),
    #[error("Lead delivery failed: {0}")]
    Delivery(String),
}

impl LeadError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        LeadError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
