//! Application state shared across all route handlers.
//!
//! Passed to handlers via axum's State extractor. Configuration is resolved
//! by the binary before the state is built; handlers never read the
//! process environment.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use meridian_core::MeridianConfig;
use meridian_leads::{Lead, LeadError, LeadSink};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration (read-only at runtime).
    pub config: Arc<MeridianConfig>,
    /// Where captured leads are delivered.
    pub lead_sink: Arc<dyn LeadSink>,
    /// Leads successfully delivered since start.
    pub leads_captured: Arc<AtomicU64>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: MeridianConfig, lead_sink: Arc<dyn LeadSink>) -> Self {
        Self {
            config: Arc::new(config),
            lead_sink,
            leads_captured: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    /// Hand a lead to the sink, counting successful deliveries.
    pub async fn deliver(&self, lead: Lead) -> Result<(), LeadError> {
        let lead_id = lead.id;
        let kind = lead.kind;
        self.lead_sink.submit(lead).await?;
        self.leads_captured.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(%lead_id, %kind, sink = self.lead_sink.name(), "Lead delivered");
        Ok(())
    }

    pub fn leads_captured(&self) -> u64 {
        self.leads_captured.load(Ordering::Relaxed)
    }
}
