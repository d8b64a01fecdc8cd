//! Application configuration.
//!
//! Settings come from an optional `config.toml` in the working directory with
//! environment variables taking precedence, so deployments can be configured
//! either way. Everything is resolved once at startup into an [`AppConfig`]
//! that is passed to the pieces that need it; no module reads the environment
//! after this point.

/// Storage backend selection and per-backend settings
pub mod storage;

pub use storage::{JsonBinSettings, StorageSettings};

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Default address the HTTP API listens on.
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Shape of the optional `config.toml` file.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    /// Address for the HTTP listener, `host:port`.
    listen_addr: Option<String>,
    /// Storage backend settings.
    #[serde(default)]
    storage: storage::StorageFileConfig,
}

/// Fully resolved application configuration.
#[derive(Debug)]
pub struct AppConfig {
    /// Address the HTTP API listens on.
    pub listen_addr: String,
    /// The selected storage backend and its settings.
    pub storage: StorageSettings,
}

/// Loads and resolves the application configuration.
///
/// A missing `config.toml` is not an error; defaults and environment
/// variables cover every setting. A present but unparseable file is.
pub fn load_app_configuration() -> Result<AppConfig> {
    load_from(Path::new("config.toml"))
}

fn load_from(path: &Path) -> Result<AppConfig> {
    let file_config = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        info!("Loaded configuration from {}", path.display());
        toml::from_str(&contents).map_err(|e| Error::Config {
            message: format!("Failed to parse {}: {e}", path.display()),
        })?
    } else {
        FileConfig::default()
    };

    let listen_addr = std::env::var("LISTEN_ADDR")
        .ok()
        .or(file_config.listen_addr)
        .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());

    let storage = storage::resolve(file_config.storage)?;

    Ok(AppConfig {
        listen_addr,
        storage,
    })
}
