//! Backend reachability probe.

use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait BackendProbe: Send + Sync {
    /// Short backend name for logs and CLI output.
    fn backend_name(&self) -> &'static str;

    /// Check that the backend answers authenticated requests.
    async fn ping(&self) -> Result<()>;
}
