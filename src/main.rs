//! Cachedisk - local cache disk resolver
//!
//! CLI entry point that dispatches to subcommands.

use cachedisk::cli::{Cli, Commands};
use cachedisk::config::ConfigManager;
use cachedisk::error::CacheDiskResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            if e.is_invalid_argument() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run() -> CacheDiskResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("cachedisk=warn"),
        1 => EnvFilter::new("cachedisk=info"),
        _ => EnvFilter::new("cachedisk=debug"),
    };

    // Logs go to stderr; stdout stays clean for plain/json/export output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Init and completions don't need config loading
    if let Commands::Init(args) = cli.command {
        return cachedisk::cli::commands::init(args).await;
    }
    if let Commands::Completions(args) = cli.command {
        return cachedisk::cli::commands::completions(args).await;
    }

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };

    // Find local config unless --no-local is set
    let local_config_path = if cli.no_local {
        debug!("Local config discovery disabled (--no-local)");
        None
    } else {
        let cwd = std::env::current_dir()
            .map_err(|e| cachedisk::error::CacheDiskError::io("getting current directory", e))?;
        let found = ConfigManager::find_local_config(&cwd);
        if let Some(ref path) = found {
            debug!("Found local config: {}", path.display());
        }
        found
    };

    let config = config_manager
        .load_merged(local_config_path.as_deref())
        .await?;

    // Dispatch to command
    match cli.command {
        Commands::Init(_) | Commands::Completions(_) => unreachable!("handled above"),
        Commands::Resolve(args) => cachedisk::cli::commands::resolve(args, &config).await,
        Commands::Volumes(args) => cachedisk::cli::commands::volumes(args, &config).await,
        Commands::Config(args) => {
            cachedisk::cli::commands::config(args, &config_manager, &config).await
        }
    }
}
