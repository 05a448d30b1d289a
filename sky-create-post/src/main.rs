//! sky-create-post - Publish a text post to Bluesky

use anyhow::{Context, Result};
use clap::Parser;
use libskycast::validation::{require, require_secret};
use libskycast::{BlueskyClient, Config, Did, MissingInput};
use secrecy::SecretString;

#[derive(Parser)]
#[command(name = "sky-create-post")]
#[command(version, about = "Publish a text post to Bluesky", long_about = None)]
struct Cli {
    /// Bluesky API URL (default: https://bsky.social/)
    #[arg(long, env = "SKYCAST_BLUESKY_API")]
    api: Option<String>,

    /// DID to post as
    #[arg(long, env = "SKYCAST_DID", default_value = "")]
    did: String,

    /// Access token to use (see sky-get-access-token)
    #[arg(long, env = "SKYCAST_ACCESS_TOKEN", hide_env_values = true, default_value = "")]
    access_token: String,

    /// Text content to post
    #[arg(long, default_value = "")]
    content: String,

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
    let content = require(&cli.content, MissingInput::Content)?;

    let config = Config::load().context("Failed to load configuration")?;
    let api = cli.api.as_deref().unwrap_or(&config.bluesky.api);
    tracing::debug!("Using Bluesky API at {}", api);

    let client = BlueskyClient::new(api, &config.http)?;
    let record = client.create_post(&access_token, &did, content).await?;

    println!("{}", record.uri);
    Ok(())
}
