use anyhow::{Result, bail};
use clap::Parser;
use tracing::{info, warn};

use review_sentiment::api::{self, AppState};
use review_sentiment::cli::{Cli, Command};
use review_sentiment::config::{API_KEY_ENV, ServiceConfig};
use review_sentiment::gemini::{Classifier, GeminiClient};
use review_sentiment::logging;
use review_sentiment::sentiment::Sentiment;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = ServiceConfig::load(cli.config.as_deref())?;
    if config.has_api_key() {
        info!("{API_KEY_ENV} is loaded");
    } else {
        warn!("{API_KEY_ENV} is not set; classification requests will fail until it is configured");
    }

    let client = GeminiClient::from_config(&config)?;
    info!(endpoint = client.endpoint(), timeout_secs = config.timeout_secs, "Gemini client ready");

    match cli.subcommand() {
        Command::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| config.bind_addr.clone());
            api::serve(&addr, AppState::new(client, config.bulk_concurrency())).await
        }
        Command::Classify { text } => {
            if text.trim().is_empty() {
                bail!("review text must not be empty");
            }
            let raw = client.classify(&text).await?;
            println!("{}", Sentiment::normalize(&raw));
            Ok(())
        }
    }
}
