//! sky-twitter-get-posts - List a Twitter user's original tweets via a Nitter mirror

use anyhow::{Context, Result};
use clap::Parser;
use libskycast::validation::require;
use libskycast::{Config, MissingInput, NitterClient, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "sky-twitter-get-posts")]
#[command(version, about = "List a Twitter user's original tweets via a Nitter mirror")]
#[command(long_about = r#"List a Twitter user's original tweets via a Nitter mirror.

The user's RSS feed is read from {api}/{username}/rss. Replies, quotes and
retweets are skipped, including retweets that only show up as a link back
to the mirror inside the tweet body. Scanning stops once --limit tweets
have been collected.

EXAMPLES:
    sky-twitter-get-posts --username jack
    sky-twitter-get-posts --username jack --api https://xcancel.com/ --limit 10
"#)]
struct Cli {
    /// Nitter mirror URL (default: https://nitter.net/)
    #[arg(long, env = "SKYCAST_NITTER_API")]
    api: Option<String>,

    /// Twitter username to use
    #[arg(long, default_value = "")]
    username: String,

    /// Maximum amount of tweets to return
    #[arg(short, long, default_value_t = 100)]
    limit: usize,

    /// Substring marking links back to the mirror (default: host of --api)
    #[arg(long, env = "SKYCAST_MIRROR_HOST")]
    mirror_host: Option<String>,

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
    tracing::debug!("sky-twitter-get-posts started with args: {:?}", cli);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let username = require(&cli.username, MissingInput::Username)?;

    let config = Config::load().context("Failed to load configuration")?;
    let api = cli.api.as_deref().unwrap_or(&config.nitter.api);
    let mirror_host = cli
        .mirror_host
        .as_deref()
        .or(config.nitter.mirror_host.as_deref());

    let client = NitterClient::new(api, mirror_host, &config.http)?;
    tracing::debug!("Treating links to {} as retweets", client.mirror_host());

    let tweets = client.get_posts(username, cli.limit).await?;

    cli.format.print(&tweets)?;
    Ok(())
}
