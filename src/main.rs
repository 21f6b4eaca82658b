//! Elidune Store - Library Management System
//!
//! Interactive front end over the flat-file catalog store.

use std::io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use elidune_store::{
    config::{AppConfig, LogFormat},
    menu, Library,
};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing; stdout belongs to the menu, so logs go to stderr
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("elidune_store={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.log_format() {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(io::stderr))
            .init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact().with_writer(io::stderr))
            .init(),
    }

    tracing::info!("Starting Elidune Store v{}", env!("CARGO_PKG_VERSION"));

    let mut library = Library::open(&config.storage)?;

    let stdin = io::stdin();
    menu::run(&mut library, stdin.lock(), io::stdout())?;

    tracing::info!("Elidune Store stopped");
    Ok(())
}
