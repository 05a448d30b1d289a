//! sky-get-posts - List an account's original Bluesky posts

use anyhow::{Context, Result};
use clap::Parser;
use libskycast::validation::{require, require_secret};
use libskycast::{BlueskyClient, Config, Did, MissingInput, OutputFormat};
use secrecy::SecretString;

#[derive(Parser)]
#[command(name = "sky-get-posts")]
#[command(version, about = "List an account's original Bluesky posts")]
#[command(long_about = r#"List an account's original Bluesky posts.

Replies and reposts are filtered out after fetching, so fewer than --limit
posts may be printed.

EXAMPLES:
    sky-get-posts --did did:plc:abc --access-token "$TOKEN"
    sky-get-posts --did did:plc:abc --limit 20 --format json | jq '.[].uri'
"#)]
struct Cli {
    /// Bluesky API URL (default: https://bsky.social/)
    #[arg(long, env = "SKYCAST_BLUESKY_API")]
    api: Option<String>,

    /// DID whose posts to list
    #[arg(long, env = "SKYCAST_DID", default_value = "")]
    did: String,

    /// Access token to use
    #[arg(long, env = "SKYCAST_ACCESS_TOKEN", hide_env_values = true, default_value = "")]
    access_token: String,

    /// Maximum amount of posts to search (including reposts etc.)
    #[arg(short, long, default_value_t = 100)]
    limit: u32,

    /// Output format: yaml or json
    #[arg(short, long, default_value = "yaml")]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    libskycast::logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let did = Did::new(require(&cli.did, MissingInput::Did)?);
    let access_token = SecretString::from(cli.access_token);
    require_secret(&access_token, MissingInput::AccessToken)?;

    let config = Config::load().context("Failed to load configuration")?;
    let api = cli.api.as_deref().unwrap_or(&config.bluesky.api);
    tracing::debug!("Using Bluesky API at {}", api);

    let client = BlueskyClient::new(api, &config.http)?;
    let posts = client.get_posts(&access_token, &did, cli.limit).await?;

    cli.format.print(&posts)?;
    Ok(())
}
