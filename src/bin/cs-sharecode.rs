use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use cs_sharecode::retry::with_retry;
use cs_sharecode::{Config, DownloadResult, ShareCodeResolver};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Get Counter-Strike demo download links from share codes
///
/// `cs-sharecode <SHARECODE> [--json]` without a subcommand behaves like
/// `info`.
#[derive(Debug, Parser)]
#[command(name = "cs-sharecode", version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Retry transient helper failures up to N times
    #[arg(long, global = true, value_name = "N")]
    retries: Option<u32>,

    /// Match share code, same as `info <SHARECODE>`
    sharecode: Option<String>,

    /// Output result as JSON (with a bare share code)
    #[arg(short, long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Get full match information from a share code
    Info {
        /// Match share code (e.g. CSGO-xxxxx-xxxxx-xxxxx-xxxxx-xxxxx)
        sharecode: String,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Get only the demo URL from a share code
    DemoUrl {
        /// Match share code (e.g. CSGO-xxxxx-xxxxx-xxxxx-xxxxx-xxxxx)
        sharecode: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "cs_sharecode=debug"
    } else {
        "cs_sharecode=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(retries) = cli.retries {
        config.retry.max_attempts = retries;
    }

    let command = match (cli.command, cli.sharecode) {
        (Some(command), _) => command,
        (None, Some(sharecode)) => Commands::Info {
            sharecode,
            json: cli.json,
        },
        (None, None) => Cli::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "a share code or a subcommand is required",
            )
            .exit(),
    };

    let resolver = ShareCodeResolver::from_config(&config)?;

    match command {
        Commands::Info { sharecode, json } => {
            tracing::debug!(share_code = %sharecode, "processing share code");
            let result = resolve(&resolver, &config, &sharecode, false).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_info(&result);
            }
        }
        Commands::DemoUrl { sharecode } => {
            let result = resolve(&resolver, &config, &sharecode, true).await?;
            println!("{}", result.demo_url);
        }
    }

    Ok(())
}

async fn resolve(
    resolver: &ShareCodeResolver,
    config: &Config,
    share_code: &str,
    quiet: bool,
) -> cs_sharecode::Result<DownloadResult> {
    with_retry(&config.retry, || resolver.resolve(share_code, quiet)).await
}

fn print_info(result: &DownloadResult) {
    println!("Match ID: {}", result.match_id);
    println!("Game: {}", result.game);
    println!("Map: {}", result.map_name);
    println!("Date: {}", result.date);
    println!("Demo URL: {}", result.demo_url);
    println!("File Name: {}", result.file_name);
    println!("Share Code: {}", result.share_code);
}
