//! Unified error type for `PlantBuddy`.
//!
//! Every fallible operation in the crate returns [`Result`]. Variants map onto
//! the HTTP statuses the API layer reports: missing plants become 404,
//! validation failures 400, duplicate same-day care actions 409, and storage
//! or configuration problems 500.

use crate::models::{ActionKind, CareAction};
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Startup configuration is missing or malformed.
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with the configuration.
        message: String,
    },

    /// A request carried a missing or invalid field.
    #[error("{message}")]
    Validation {
        /// What was wrong with the input.
        message: String,
    },

    /// The referenced plant does not exist.
    #[error("Plant not found: {id}")]
    PlantNotFound {
        /// Id the caller asked for.
        id: i64,
    },

    /// A care action of this kind was already recorded for the plant today.
    /// Carries the conflicting record so callers can report it.
    #[error("Plant already {} today", kind.past_tense())]
    DuplicateAction {
        /// Kind of action that was attempted.
        kind: ActionKind,
        /// The action already logged for today.
        existing: CareAction,
    },

    /// The storage backend failed or returned malformed data.
    #[error("Storage error: {message}")]
    Storage {
        /// Backend-reported failure description.
        message: String,
    },

    /// I/O error from the file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Database error from the `SQLite` store.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// HTTP error from the remote bin store.
    #[error("Remote storage error: {0}")]
    Http(#[from] reqwest::Error),

    /// Persisted JSON that could not be parsed or encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
