//! Jsondeck server entry point.
//!
//! Serves create/read/update/delete over the `users` and `posts`
//! collections, each persisted as one JSON document in the data
//! directory.
//!
//! # Startup Sequence
//!
//! 1. Load configuration (`jsondeck.yaml` + `JSONDECK_*` overrides)
//! 2. Initialize structured logging (tracing)
//! 3. Create the file store rooted at `storage.data_dir`
//! 4. Serve HTTP until `Ctrl-C`

mod config;
mod error;

use std::sync::Arc;

use jsondeck_api::{AppState, start_server};
use jsondeck_store::{FileStore, Store};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigSource, LoggingConfig};
use crate::error::AppError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, logging setup, or the server fails.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Load configuration. Logging is not up yet; the source is
    //    reported once it is.
    let (config, source) = AppConfig::load()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!("jsondeck-server starting");
    match &source {
        ConfigSource::File(path) => info!(path = %path.display(), "Configuration loaded"),
        ConfigSource::Defaults(path) => {
            info!(path = %path.display(), "Config file not found, using defaults");
        }
    }
    info!(
        host = %config.server.host,
        port = config.server.port,
        data_dir = %config.storage.data_dir.display(),
        "Effective configuration"
    );

    // 3. Create the store.
    let store: Arc<dyn Store> = Arc::new(FileStore::new(&config.storage.data_dir));
    let state = Arc::new(AppState::new(store));

    // 4. Serve until shutdown.
    start_server(&config.server, state).await?;

    info!("jsondeck-server stopped");
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) -> Result<(), AppError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level).map_err(|e| AppError::LogFilter {
            directive: logging.level.clone(),
            message: e.to_string(),
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
