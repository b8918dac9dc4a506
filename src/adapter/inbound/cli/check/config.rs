use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::backend::BackendKind;
use crate::infrastructure::config::settings::Config;

/// Validate configuration file and environment without starting the server.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Bind", &config.server.bind);
    output::field("Backend", config.backend.kind);
    let roles: Vec<&str> = config.access.admin_roles.iter().map(|r| r.as_str()).collect();
    output::field("Admin roles", roles.join(", "));
    output::field("Recent txs", config.wallet.recent_transactions);

    match config.backend.kind {
        BackendKind::Supabase => {
            output::field("Supabase URL", &config.backend.supabase.url);
            output::success("Service-role key detected");
            if config.backend.supabase.anon_key.is_none() {
                output::warning("SUPABASE_ANON_KEY not set; token checks use the service-role key");
            }
        }
        BackendKind::Memory => {
            output::field("Seed users", config.backend.memory.users.len());
            output::warning("Memory backend is not persistent");
        }
    }

    output::success("Configuration check complete");
    Ok(())
}
