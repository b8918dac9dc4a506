use clap::Parser;

use tsbgate::adapter::inbound::cli::command::{CheckCommand, Cli, ColorChoice, Commands};
use tsbgate::adapter::inbound::cli::output::{self, OutputConfig};
use tsbgate::adapter::inbound::cli::{check, serve};
use tsbgate::error::Result;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    if let Err(e) = run(cli.command).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Serve(args) => serve::execute(&args).await,
        Commands::Check(CheckCommand::Config(args)) => check::config::execute_config(&args.config),
        Commands::Check(CheckCommand::Backend(args)) => {
            check::backend::execute_backend(&args.config).await
        }
    }
}
