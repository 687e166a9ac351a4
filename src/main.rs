//! OpenSASE Courses - Self-hosted course marketplace catalog service

use std::sync::Arc;

use anyhow::Result;
use opensase_courses::api::{router, AppState};
use opensase_courses::catalog::Catalog;
use opensase_courses::config::{Config, LogFormat, LoggingConfig};
use opensase_courses::storage::{FileStore, KeyValueStore, MemoryStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn init_logging(config: &LoggingConfig) {
    let fmt = match config.format {
        LogFormat::Compact => tracing_subscriber::fmt::layer().compact().boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().pretty().boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
    };
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(fmt).with(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    init_logging(&config.logging);

    let catalog = Catalog::load(config.catalog.path.as_deref())?;
    tracing::info!(products = catalog.len(), source = ?config.catalog.path, "catalog loaded");

    let storage: Arc<dyn KeyValueStore> = match &config.stores.path {
        Some(path) => Arc::new(FileStore::open(path)?),
        None => Arc::new(MemoryStore::new()),
    };

    let app = router(AppState::new(catalog, storage, &config));
    let address = config.bind_addr();
    tracing::info!("🚀 OpenSASE Courses listening on {}", address);
    axum::serve(tokio::net::TcpListener::bind(&address).await?, app).await?;
    Ok(())
}
