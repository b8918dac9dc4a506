//! Audit-log port.

use async_trait::async_trait;

use crate::domain::{AuditEntry, Page};
use crate::error::Result;

/// Append-only sink for `audit_logs`.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Persist one entry.
    async fn record(&self, entry: &AuditEntry) -> Result<()>;

    /// List entries, newest first.
    async fn list(&self, page: Page) -> Result<Vec<AuditEntry>>;
}
