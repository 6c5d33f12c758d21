//! Lead sinks: where captured leads are delivered.
//!
//! The HTTP layer only knows the [`LeadSink`] trait. Email or CRM delivery
//! plugs in here; the binary ships with [`LogSink`].

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::LeadError;
use crate::types::Lead;

/// Downstream delivery for captured leads.
#[async_trait]
pub trait LeadSink: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Deliver one lead.
    async fn submit(&self, lead: Lead) -> Result<(), LeadError>;
}

/// Writes each lead to the structured log. Never fails.
pub struct LogSink;

#[async_trait]
impl LeadSink for LogSink {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn submit(&self, lead: Lead) -> Result<(), LeadError> {
        tracing::info!(
            lead_id = %lead.id,
            kind = %lead.kind,
            source = %lead.source,
            email_domain = %lead.email_domain(),
            summary_len = lead.summary.len(),
            "Lead captured"
        );
        Ok(())
    }
}

/// Keeps leads in memory. Optionally rejects every lead.
#[derive(Default)]
pub struct MemorySink {
    leads: Mutex<Vec<Lead>>,
    fail: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every delivery fails.
    pub fn failing() -> Self {
        Self {
            leads: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Snapshot of the delivered leads, oldest first.
    pub fn leads(&self) -> Vec<Lead> {
        self.leads
            .lock()
            .map(|leads| leads.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.leads.lock().map(|leads| leads.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LeadSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn submit(&self, lead: Lead) -> Result<(), LeadError> {
        if self.fail {
            return Err(LeadError::Delivery("memory sink is set to fail".to_string()));
        }
        let mut leads = self
            .leads
            .lock()
            .map_err(|e| LeadError::Delivery(format!("lead store lock poisoned: {}", e)))?;
        leads.push(lead);
        Ok(())
    }
}
