//! dirsearch server entry point

use anyhow::{Context, Result};
use dirsearch::{
    config,
    store::{MemoryStore, RecordStore},
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let mut settings_path = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            "-V" | "--version" => {
                println!("dirsearch {}", dirsearch::VERSION);
                return Ok(());
            }
            "-c" | "--config" => {
                let path = args.next().context("--config requires a file path")?;
                settings_path = Some(PathBuf::from(path));
            }
            other => {
                print_usage();
                anyhow::bail!("unknown argument: {}", other);
            }
        }
    }

    let settings = config::load(settings_path.as_deref())?;

    // RUST_LOG wins over the settings file
    let default_level = if settings.general.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    info!("Starting dirsearch v{}", dirsearch::VERSION);
    info!("Loaded configuration for instance: {}", settings.general.instance_name);

    let store: Arc<dyn RecordStore> = match MemoryStore::from_file(&settings.data.path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(
                "Could not load dataset {}: {:#}; serving an empty directory",
                settings.data.path.display(),
                e
            );
            Arc::new(MemoryStore::default())
        }
    };

    let state = AppState::load(settings.clone(), store).await;
    let app = create_router(state);

    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);
    match &settings.server.base_url {
        Some(base_url) => info!("Starting server on http://{} ({})", addr, base_url),
        None => info!("Starting server on http://{}", addr),
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

fn print_usage() {
    println!(
        r#"
dirsearch v{}
Search and suggestion engine for a localized business directory

USAGE:
    dirsearch [OPTIONS]

OPTIONS:
    -c, --config <FILE>    Path to configuration file
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    DIRSEARCH_SETTINGS_PATH  Path to settings.yml
    DIRSEARCH_DEBUG          Enable debug logging (true/false)
    DIRSEARCH_PORT           Server port
    DIRSEARCH_BIND_ADDRESS   Bind address
    DIRSEARCH_BASE_URL       Public base URL
    DIRSEARCH_DATA_PATH      Path to the directory dataset
    RUST_LOG                 Log filter, overrides DIRSEARCH_DEBUG
"#,
        dirsearch::VERSION
    );
}
