//! Supabase backend adapter.
//!
//! Implements every outbound port against a hosted Supabase project:
//! GoTrue for token verification, PostgREST for table access, and the
//! `tsb_apply_tx` RPC for balance mutation.

mod client;
mod dto;
pub mod settings;
mod store;

use async_trait::async_trait;

pub use client::SupabaseClient;
pub use settings::{SupabaseConfig, SupabaseHttpConfig};

use self::dto::AuthUserResponse;
use crate::error::Result;
use crate::port::{AuthUser, BackendProbe, TokenVerifier};

#[async_trait]
impl TokenVerifier for SupabaseClient {
    async fn verify(&self, token: &str) -> Result<Option<AuthUser>> {
        let user: Option<AuthUserResponse> = self.get_auth_user(token).await?;
        Ok(user.map(|u| AuthUser {
            id: u.id,
            email: u.email,
        }))
    }
}

#[async_trait]
impl BackendProbe for SupabaseClient {
    fn backend_name(&self) -> &'static str {
        "supabase"
    }

    async fn ping(&self) -> Result<()> {
        let mut url = self.rest_url("profiles")?;
        url.query_pairs_mut()
            .append_pair("select", "id")
            .append_pair("limit", "1");
        let _: Vec<serde_json::Value> = self.select(url).await?;
        Ok(())
    }
}
