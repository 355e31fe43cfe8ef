mod commands;
mod config;
mod output;

use anyhow::Context;
use clap::Parser;
use shopfront_db::{FileStore, LocalStore};
use shopfront_provider::DataProvider;
use shopfront_remote::CatalogApi;
use shopfront_state::CatalogStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::commands::Cli;
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (ignore errors if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "shopfront=info,shopfront_provider=info,shopfront_state=info,shopfront_db=info,shopfront_remote=warn".into()
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    tracing::debug!(
        api_url = %config.api_url,
        timeout_ms = config.api_timeout.as_millis() as u64,
        data_dir = %config.data_dir.display(),
        "Configuration loaded"
    );

    let remote = CatalogApi::new(&config.api_url).with_timeout(config.api_timeout);
    let kv = FileStore::open(config.data_dir.clone()).with_context(|| {
        format!(
            "Failed to open local store at {}",
            config.data_dir.display()
        )
    })?;
    let local = LocalStore::new(kv);
    let mut store = CatalogStore::new(DataProvider::new(remote, local));

    let mut stdout = std::io::stdout().lock();
    commands::run(cli.command, &mut store, &mut stdout).await
}
