//! Storage backend configuration.
//!
//! Selects one of the three backends and gathers its settings, with
//! environment variables taking precedence over `config.toml` values. The
//! remote bin backend has hard requirements (API key and both bin ids); they
//! are checked here so a misconfigured deployment fails at startup rather
//! than on the first request.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Default `SQLite` location; `mode=rwc` creates the file on first run.
const DEFAULT_DATABASE_URL: &str = "sqlite://data/plant_buddy.sqlite?mode=rwc";

/// Default directory for the JSON file backend.
const DEFAULT_DATA_DIR: &str = "data";

/// Default base URL of the remote bin service.
const DEFAULT_JSON_BIN_API_URL: &str = "https://api.jsonbin.io/v3/b";

/// `[storage]` section of `config.toml`. Every field is optional; unrelated
/// fields for backends that are not selected are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StorageFileConfig {
    /// `"sqlite"` (default), `"json-file"`, or `"json-bin"`.
    pub backend: Option<String>,
    /// `SQLite` connection URL.
    pub database_url: Option<String>,
    /// Directory holding `plants.json` and `actions.json`.
    pub data_dir: Option<PathBuf>,
    /// Base URL of the remote bin service.
    pub api_url: Option<String>,
    /// Master key for the remote bin service.
    pub api_key: Option<String>,
    /// Bin id holding the plants document.
    pub plants_bin_id: Option<String>,
    /// Bin id holding the actions document.
    pub actions_bin_id: Option<String>,
}

/// Resolved settings for the selected backend.
#[derive(Clone, Debug)]
pub enum StorageSettings {
    /// Local `SQLite` database via SeaORM.
    Sqlite {
        /// Connection URL, e.g. `sqlite://data/plant_buddy.sqlite?mode=rwc`.
        database_url: String,
    },
    /// Flat JSON documents on the local filesystem.
    JsonFile {
        /// Directory holding `plants.json` and `actions.json`.
        data_dir: PathBuf,
    },
    /// Remote JSON bin document service.
    JsonBin(JsonBinSettings),
}

/// Connection settings for the remote bin backend.
#[derive(Clone, Debug)]
pub struct JsonBinSettings {
    /// Base URL, e.g. `https://api.jsonbin.io/v3/b`.
    pub api_url: String,
    /// Master key sent as `X-Master-Key`.
    pub api_key: String,
    /// Bin id holding the plants document.
    pub plants_bin_id: String,
    /// Bin id holding the actions document.
    pub actions_bin_id: String,
}

/// Resolves backend settings from file config and process environment.
pub fn resolve(file: StorageFileConfig) -> Result<StorageSettings> {
    resolve_from(file, |key| std::env::var(key).ok())
}

/// Resolution with an explicit environment lookup, for testability.
fn resolve_from(
    file: StorageFileConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<StorageSettings> {
    let backend = env("STORAGE_BACKEND")
        .or(file.backend)
        .unwrap_or_else(|| "sqlite".to_string());

    match backend.as_str() {
        "sqlite" => Ok(StorageSettings::Sqlite {
            database_url: env("DATABASE_URL")
                .or(file.database_url)
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
        }),
        "json-file" => Ok(StorageSettings::JsonFile {
            data_dir: env("PLANT_DATA_DIR")
                .map(PathBuf::from)
                .or(file.data_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        }),
        "json-bin" => {
            let api_url = env("JSON_BIN_API_URL")
                .or(file.api_url)
                .unwrap_or_else(|| DEFAULT_JSON_BIN_API_URL.to_string());
            let api_key = env("JSON_BIN_API_KEY").or(file.api_key).ok_or_else(|| {
                Error::Config {
                    message: "JSON_BIN_API_KEY is required for the json-bin backend".to_string(),
                }
            })?;
            let plants_bin_id =
                env("PLANTS_BIN_ID")
                    .or(file.plants_bin_id)
                    .ok_or_else(|| Error::Config {
                        message: "PLANTS_BIN_ID is required for the json-bin backend".to_string(),
                    })?;
            let actions_bin_id =
                env("ACTIONS_BIN_ID")
                    .or(file.actions_bin_id)
                    .ok_or_else(|| Error::Config {
                        message: "ACTIONS_BIN_ID is required for the json-bin backend".to_string(),
                    })?;

            Ok(StorageSettings::JsonBin(JsonBinSettings {
                api_url,
                api_key,
                plants_bin_id,
                actions_bin_id,
            }))
        }
        other => Err(Error::Config {
            message: format!(
                "Unknown storage backend {other:?} (expected sqlite, json-file, or json-bin)"
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_to_sqlite() {
        let settings = resolve_from(StorageFileConfig::default(), no_env).unwrap();
        match settings {
            StorageSettings::Sqlite { database_url } => {
                assert_eq!(database_url, DEFAULT_DATABASE_URL);
            }
            other => panic!("expected sqlite settings, got {other:?}"),
        }
    }

    #[test]
    fn test_env_overrides_file_backend() {
        let file = StorageFileConfig {
            backend: Some("sqlite".to_string()),
            ..StorageFileConfig::default()
        };
        let env = |key: &str| match key {
            "STORAGE_BACKEND" => Some("json-file".to_string()),
            "PLANT_DATA_DIR" => Some("/tmp/plants".to_string()),
            _ => None,
        };

        let settings = resolve_from(file, env).unwrap();
        match settings {
            StorageSettings::JsonFile { data_dir } => {
                assert_eq!(data_dir, PathBuf::from("/tmp/plants"));
            }
            other => panic!("expected json-file settings, got {other:?}"),
        }
    }

    #[test]
    fn test_json_bin_requires_key_and_bin_ids() {
        let file = StorageFileConfig {
            backend: Some("json-bin".to_string()),
            api_key: Some("key".to_string()),
            plants_bin_id: Some("p1".to_string()),
            ..StorageFileConfig::default()
        };

        // actions_bin_id missing
        let err = resolve_from(file.clone(), no_env).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("ACTIONS_BIN_ID"));

        let complete = StorageFileConfig {
            actions_bin_id: Some("a1".to_string()),
            ..file
        };
        let settings = resolve_from(complete, no_env).unwrap();
        match settings {
            StorageSettings::JsonBin(bin) => {
                assert_eq!(bin.api_url, DEFAULT_JSON_BIN_API_URL);
                assert_eq!(bin.plants_bin_id, "p1");
                assert_eq!(bin.actions_bin_id, "a1");
            }
            other => panic!("expected json-bin settings, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let file = StorageFileConfig {
            backend: Some("mongodb".to_string()),
            ..StorageFileConfig::default()
        };
        let err = resolve_from(file, no_env).unwrap_err();
        assert!(err.to_string().contains("Unknown storage backend"));
    }
}
