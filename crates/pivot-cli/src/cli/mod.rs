//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use pivot_core::config::Config;
use pivot_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "pivot")]
#[command(version = "0.1")]
#[command(about = "AI career advisor for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the backend base URL from config
    #[arg(long, value_name = "URL", env = "PIVOT_BASE_URL")]
    base_url: Option<String>,

    /// Log level filter for this run (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List career categories and roles from the backend
    Careers,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Set the backend base URL in the config file
    SetUrl {
        /// New base URL, e.g. http://127.0.0.1:5000
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        command,
        base_url,
        log_level,
    } = cli;

    let mut config = Config::load().context("load config")?;
    if let Some(url) = base_url.as_deref() {
        config.api.base_url = url.to_string();
    }

    let _log_guard = logging::init(&config, log_level.as_deref()).context("init logging")?;
    tracing::debug!(base_url = %config.api.base_url, "config loaded");

    // default to the interactive advisor
    let Some(command) = command else {
        return crate::modes::run_advisor(&config).await;
    };

    match command {
        Commands::Careers => commands::careers::run(&config).await,

        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetUrl { url } => commands::config::set_url(&url),
        },
    }
}
