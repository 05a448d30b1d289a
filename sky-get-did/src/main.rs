//! sky-get-did - Resolve a Bluesky handle to its DID

use anyhow::{Context, Result};
use clap::Parser;
use libskycast::{BlueskyClient, Config};

#[derive(Parser, Debug)]
#[command(name = "sky-get-did")]
#[command(version, about = "Resolve a Bluesky handle to its DID", long_about = None)]
struct Cli {
    /// Bluesky API URL (default: https://bsky.social/)
    #[arg(long, env = "SKYCAST_BLUESKY_API")]
    api: Option<String>,

    /// Handle to resolve
    #[arg(long, default_value = "bsky.app")]
    handle: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    libskycast::logging::init(cli.verbose);
    tracing::debug!("sky-get-did started with args: {:?}", cli);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let api = cli.api.as_deref().unwrap_or(&config.bluesky.api);

    let client = BlueskyClient::new(api, &config.http)?;
    let did = client.resolve_handle(cli.handle.trim()).await?;

    println!("{}", did.to_uri());
    Ok(())
}
