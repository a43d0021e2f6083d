//! Collection binary: scrape matching Ed threads into `posts.json`.

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ed_showcase::collector::{write_posts, Collector};
use ed_showcase::config::Config;
use ed_showcase::ed::EdClient;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    init_tracing()?;

    info!("Starting ed-showcase scraper");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    let token = config
        .ed_api_token
        .as_deref()
        .context("ED_API_TOKEN must be set")?;

    info!(course_id = config.course_id, "Configuration loaded");

    let client =
        EdClient::new(&config.ed_base_url, token).context("Failed to build Ed client")?;
    let collector = Collector::from_config(client, &config)?;

    let posts = collector.run().await.context("Login failed")?;

    write_posts(&config.posts_path, &posts).await?;
    info!(
        count = posts.len(),
        path = %config.posts_path.display(),
        "Saved posts"
    );

    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,ed_showcase=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    Ok(())
}
