//! Audit-log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::id::UserId;

/// Audited administrative actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditAction {
    #[serde(rename = "ledger.rollback")]
    LedgerRollback,
    #[serde(rename = "ledger.adjust")]
    LedgerAdjust,
    #[serde(rename = "user.role_change")]
    UserRoleChange,
    #[serde(other)]
    Other,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LedgerRollback => "ledger.rollback",
            Self::LedgerAdjust => "ledger.adjust",
            Self::UserRoleChange => "user.role_change",
            Self::Other => "other",
        }
    }
}

/// A row of `audit_logs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Assigned by the backend on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub actor_id: UserId,
    pub action: AuditAction,
    pub target_type: String,
    #[serde(default)]
    pub target_id: Option<String>,
    #[serde(default)]
    pub detail: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl AuditEntry {
    #[must_use]
    pub fn new(actor_id: UserId, action: AuditAction, target_type: impl Into<String>) -> Self {
        Self {
            id: None,
            actor_id,
            action,
            target_type: target_type.into(),
            target_id: None,
            detail: Value::Null,
            created_at: None,
        }
    }

    #[must_use]
    pub fn target(mut self, target_id: impl Into<String>) -> Self {
        self.target_id = Some(target_id.into());
        self
    }

    #[must_use]
    pub fn detail(mut self, detail: Value) -> Self {
        self.detail = detail;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_payload_omits_backend_fields() {
        let entry = AuditEntry::new(
            UserId::new("root"),
            AuditAction::LedgerRollback,
            "tsb_transaction",
        )
        .target("tx-1")
        .detail(json!({"amount": "-5"}));
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["action"], "ledger.rollback");
        assert_eq!(value["target_id"], "tx-1");
        assert!(value.get("id").is_none());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn unknown_action_reads_as_other() {
        let row = r#"{"actor_id":"a","action":"lottery.draw","target_type":"lottery_events"}"#;
        let entry: AuditEntry = serde_json::from_str(row).unwrap();
        assert_eq!(entry.action, AuditAction::Other);
        assert_eq!(entry.detail, Value::Null);
    }
}
