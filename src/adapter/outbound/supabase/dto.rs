//! Wire types for the Supabase REST, RPC and auth endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{AppliedTransaction, Role, TxRequest, UserId};

/// `GET /auth/v1/user` response (only the fields we use).
#[derive(Debug, Deserialize)]
pub struct AuthUserResponse {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
}

/// Parameters of the `tsb_apply_tx` procedure.
#[derive(Debug, Serialize)]
pub struct ApplyTxParams<'a> {
    pub p_user_id: &'a UserId,
    pub p_amount: Decimal,
    pub p_kind: &'static str,
    pub p_reason: Option<&'a str>,
    pub p_ref_id: Option<&'a str>,
    pub p_actor_id: Option<&'a UserId>,
}

impl<'a> From<&'a TxRequest> for ApplyTxParams<'a> {
    fn from(request: &'a TxRequest) -> Self {
        Self {
            p_user_id: request.user_id(),
            p_amount: request.amount(),
            p_kind: request.kind().as_str(),
            p_reason: request.reason(),
            p_ref_id: request.ref_id(),
            p_actor_id: request.actor_id(),
        }
    }
}

/// `tsb_apply_tx` result. Set-returning procedures come back as a one-row
/// array, scalar-record procedures as a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApplyTxResponse {
    Row(AppliedTransaction),
    Rows(Vec<AppliedTransaction>),
}

impl ApplyTxResponse {
    pub fn into_applied(self) -> Option<AppliedTransaction> {
        match self {
            Self::Row(row) => Some(row),
            Self::Rows(rows) => rows.into_iter().next(),
        }
    }
}

/// `PATCH profiles` body.
#[derive(Debug, Serialize)]
pub struct RoleUpdate {
    pub role: Role,
}

/// Error body returned by PostgREST or GoTrue.
///
/// PostgREST uses `code`/`message`/`details`; GoTrue uses `msg` or
/// `error_description`. `code` is a string in one and a number in the other.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl ErrorBody {
    pub fn code(&self) -> Option<String> {
        match &self.code {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<String> {
        let message = self
            .message
            .as_ref()
            .or(self.msg.as_ref())
            .or(self.error_description.as_ref())?;
        Some(match &self.details {
            Some(details) if !details.is_empty() => format!("{message} ({details})"),
            _ => message.clone(),
        })
    }
}
