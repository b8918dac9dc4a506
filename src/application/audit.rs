//! Best-effort audit trail.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{AuditEntry, Page};
use crate::error::Result;
use crate::port::AuditSink;

/// Wraps an [`AuditSink`] with fire-and-forget write semantics.
///
/// A failed write is logged and swallowed; it never changes the outcome of
/// the operation being audited.
#[derive(Clone)]
pub struct AuditTrail {
    sink: Arc<dyn AuditSink>,
}

impl AuditTrail {
    #[must_use]
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    /// Record an entry, logging instead of returning failures.
    pub async fn record(&self, entry: AuditEntry) {
        match self.sink.record(&entry).await {
            Ok(()) => debug!(
                action = entry.action.as_str(),
                actor = %entry.actor_id,
                target = ?entry.target_id,
                "Audit entry recorded"
            ),
            Err(e) => warn!(
                error = %e,
                action = entry.action.as_str(),
                actor = %entry.actor_id,
                "Audit write failed"
            ),
        }
    }

    /// List recorded entries, newest first.
    pub async fn list(&self, page: Page) -> Result<Vec<AuditEntry>> {
        self.sink.list(page).await
    }
}
