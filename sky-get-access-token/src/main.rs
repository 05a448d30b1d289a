//! sky-get-access-token - Exchange a DID and app password for a Bluesky access token

use anyhow::{Context, Result};
use clap::Parser;
use libskycast::validation::{require, require_secret};
use libskycast::{BlueskyClient, Config, Did, MissingInput};
use secrecy::{ExposeSecret, SecretString};

#[derive(Parser)]
#[command(name = "sky-get-access-token")]
#[command(version, about = "Exchange a DID and app password for a Bluesky access token")]
#[command(long_about = r#"Exchange a DID and app password for a Bluesky access token.

The token is printed on stdout so it can be captured by other tools:

    export SKYCAST_ACCESS_TOKEN=$(sky-get-access-token --did "$DID" --app-password "$PASSWORD")
    sky-get-posts --did "$DID"

App passwords are created at https://bsky.app/settings/app-passwords.
"#)]
struct Cli {
    /// Bluesky API URL (default: https://bsky.social/)
    #[arg(long, env = "SKYCAST_BLUESKY_API")]
    api: Option<String>,

    /// DID to authenticate as
    #[arg(long, env = "SKYCAST_DID", default_value = "")]
    did: String,

    /// App password to use
    #[arg(long, env = "SKYCAST_APP_PASSWORD", hide_env_values = true, default_value = "")]
    app_password: String,

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
    let app_password = SecretString::from(cli.app_password);
    require_secret(&app_password, MissingInput::AppPassword)?;

    let config = Config::load().context("Failed to load configuration")?;
    let api = cli.api.as_deref().unwrap_or(&config.bluesky.api);
    tracing::debug!("Using Bluesky API at {}", api);

    let client = BlueskyClient::new(api, &config.http)?;
    let token = client.get_access_token(&did, &app_password).await?;

    println!("{}", token.expose_secret());
    Ok(())
}
