//! Storage backends behind one polymorphic repository interface.
//!
//! The reference deployment history left this system with three parallel ways
//! to persist plants: a local database, flat JSON files, and a remote JSON
//! document service. They are modeled here as interchangeable implementations
//! of the [`PlantStore`] and [`ActionStore`] traits so the core logic and the
//! API are written once.
//!
//! Consistency contract: single-writer, last-write-wins. The document
//! backends serialize their whole-collection read-modify-write cycles behind
//! an internal mutex; nothing merges concurrent edits.

pub mod json_bin;
pub mod json_file;
pub mod sqlite;

use crate::config::StorageSettings;
use crate::errors::Result;
use crate::models::{CareAction, Plant};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

pub use json_bin::JsonBinStore;
pub use json_file::JsonFileStore;
pub use sqlite::SqliteStore;

/// Repository operations for plants.
///
/// Implementations assign ids on insert; callers pass `id: 0` for new plants
/// and receive the stored record back with its real id.
#[async_trait]
pub trait PlantStore: Send + Sync {
    /// All plants, in stable id order.
    async fn list_plants(&self) -> Result<Vec<Plant>>;

    /// A single plant by id, or `None` if absent.
    async fn get_plant(&self, id: i64) -> Result<Option<Plant>>;

    /// Stores a new plant, assigning its id.
    async fn insert_plant(&self, plant: Plant) -> Result<Plant>;

    /// Replaces the stored plant with the same id.
    /// Fails with [`crate::errors::Error::PlantNotFound`] if absent.
    async fn update_plant(&self, plant: Plant) -> Result<Plant>;

    /// Removes a plant by id. Returns whether anything was removed.
    async fn remove_plant(&self, id: i64) -> Result<bool>;
}

/// Repository operations for the append-only care action log.
#[async_trait]
pub trait ActionStore: Send + Sync {
    /// Logged actions, optionally filtered by plant and by UTC calendar day.
    async fn list_actions(
        &self,
        plant_id: Option<i64>,
        day: Option<NaiveDate>,
    ) -> Result<Vec<CareAction>>;

    /// Appends a care action, assigning its id.
    async fn insert_action(&self, action: CareAction) -> Result<CareAction>;
}

/// Next id for a whole-document collection: one past the largest in use.
/// Safe under the single-writer discipline the document backends enforce.
pub(crate) fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

/// A complete storage backend.
pub trait Store: PlantStore + ActionStore {}

impl<T: PlantStore + ActionStore> Store for T {}

/// Shared handle to the configured backend.
pub type SharedStore = Arc<dyn Store>;

/// Builds the backend selected by configuration.
///
/// The `SQLite` backend connects and creates its tables; the document
/// backends only set up their handles, creating files or bins lazily on
/// first write.
pub async fn connect(settings: &StorageSettings) -> Result<SharedStore> {
    match settings {
        StorageSettings::Sqlite { database_url } => {
            info!("Using SQLite storage at {}", database_url);
            Ok(Arc::new(SqliteStore::connect(database_url).await?))
        }
        StorageSettings::JsonFile { data_dir } => {
            info!("Using JSON file storage in {}", data_dir.display());
            Ok(Arc::new(JsonFileStore::new(data_dir.clone())))
        }
        StorageSettings::JsonBin(bin) => {
            info!("Using remote JSON bin storage at {}", bin.api_url);
            Ok(Arc::new(JsonBinStore::new(bin.clone())?))
        }
    }
}
