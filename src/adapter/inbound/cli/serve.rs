//! Handler for the `serve` command.

use tracing::info;

use crate::adapter::inbound::cli::command::ServeArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::http;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Execute the serve command.
pub async fn execute(args: &ServeArgs) -> Result<()> {
    let path = &args.config.config;
    let mut config = Config::load(path)?;
    apply_overrides(&mut config, args, output::verbosity(), output::is_json());
    config.validate()?;
    config.init_logging();

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Config", path.display());
    output::field("Backend", config.backend.kind);
    output::field("Listening", output::highlight(&config.server.bind));

    let state = bootstrap::build_state(&config)?;
    info!(
        bind = %config.server.bind,
        backend = %config.backend.kind,
        "Starting tsbgate"
    );
    http::serve(state, &config.server).await
}

fn apply_overrides(config: &mut Config, args: &ServeArgs, verbosity: u8, json: bool) {
    if let Some(bind) = &args.bind {
        config.server.bind.clone_from(bind);
    }
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    } else if verbosity >= 2 {
        config.logging.level = "trace".into();
    } else if verbosity == 1 {
        config.logging.level = "debug".into();
    }
    if json {
        config.logging.format = "json".into();
    }
}
