use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Probe the configured backend with one authenticated request.
pub async fn execute_backend<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = Config::load(config_path.as_ref())?;
    let backend = bootstrap::build_backend(&config.backend)?;

    output::section("Backend Check");
    output::field("Backend", backend.probe.backend_name());

    let pb = output::spinner("Contacting backend...");
    match backend.probe.ping().await {
        Ok(()) => {
            output::spinner_success(&pb, "Backend reachable");
            Ok(())
        }
        Err(e) => {
            output::spinner_fail(&pb, &format!("Backend unreachable: {e}"));
            output::hint("check SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY");
            Err(e)
        }
    }
}
