mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use crate::commands::Commands;
use crate::config::{AppConfig, CliOverrides};

/// Command-line client for the help center, notification settings and user profile APIs
#[derive(Parser)]
#[command(name = "appkit")]
#[command(version, disable_help_subcommand = true)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API base URL (overrides config)
    #[arg(long)]
    base_url: Option<String>,

    /// Bearer token (overrides config)
    #[arg(long, env = "APPKIT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) defaults -> 2) YAML -> 3) env (APPKIT__*) -> 4) CLI flags
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(CliOverrides {
        base_url: cli.base_url,
        token: cli.token,
    });

    logging::init(&config.logging, cli.verbose);

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let Some(command) = cli.command else {
        bail!("no command given, see --help");
    };
    tracing::debug!(?command, base_url = %config.api.base_url, "running command");

    let output = commands::run(command, &config).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
