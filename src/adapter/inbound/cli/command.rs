//! Command-line interface definitions.
//!
//! Defines the CLI structure for the tsbgate gateway using `clap`: serving
//! the HTTP API and running diagnostic checks.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Pi marketplace admin and TSB wallet API gateway
#[derive(Parser, Debug)]
#[command(name = "tsbgate")]
#[command(version, about)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Shared `--config` argument.
#[derive(Args, Debug, Clone)]
pub struct ConfigPathArg {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for `tsbgate serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// Override `[server] bind`
    #[arg(long)]
    pub bind: Option<String>,

    /// Override the log level (e.g. debug, info)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Subcommands for `tsbgate check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file and environment.
    Config(ConfigPathArg),
    /// Probe the configured backend.
    Backend(ConfigPathArg),
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_name_and_version() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "tsbgate");
        assert!(cmd.get_version().is_some());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["tsbgate", "serve"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.config.config, Path::new("config.toml"));
        assert!(args.bind.is_none());
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "tsbgate",
            "serve",
            "--config",
            "prod.toml",
            "--bind",
            "0.0.0.0:9000",
        ])
        .unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.config.config, Path::new("prod.toml"));
        assert_eq!(args.bind.as_deref(), Some("0.0.0.0:9000"));
    }

    #[test]
    fn test_parse_check_backend() {
        let cli = Cli::try_parse_from(["tsbgate", "check", "backend", "-c", "x.toml"]).unwrap();
        let Commands::Check(CheckCommand::Backend(args)) = cli.command else {
            panic!("expected check backend");
        };
        assert_eq!(args.config, Path::new("x.toml"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tsbgate", "check", "config", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_color_never() {
        let cli = Cli::try_parse_from(["tsbgate", "--color", "never", "serve"]).unwrap();
        assert!(matches!(cli.color, ColorChoice::Never));
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["tsbgate"]).is_err());
    }
}
