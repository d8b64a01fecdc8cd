//! Flat JSON file storage backend.
//!
//! Persists `{ "plants": [...] }` in `plants.json` and `{ "actions": [...] }`
//! in `actions.json` under the configured data directory. Each document is
//! rewritten wholesale on every mutation; there is no append-only log and no
//! partial update. A missing file or directory reads as an empty collection,
//! while malformed JSON is a storage error.
//!
//! Mutations hold an internal mutex across the read-modify-write cycle, which
//! is the single-writer discipline the whole-document format needs.

use crate::errors::{Error, Result};
use crate::models::{CareAction, Plant};
use crate::store::{ActionStore, PlantStore, next_id};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::path::PathBuf;
use tokio::sync::Mutex;

const PLANTS_FILE: &str = "plants.json";
const ACTIONS_FILE: &str = "actions.json";

/// Top-level shape of `plants.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PlantsDocument {
    #[serde(default)]
    plants: Vec<Plant>,
}

/// Top-level shape of `actions.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ActionsDocument {
    #[serde(default)]
    actions: Vec<CareAction>,
}

/// Storage backend over two whole-document JSON files.
pub struct JsonFileStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store rooted at `data_dir`. The directory and files are
    /// created lazily on first write.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            write_lock: Mutex::new(()),
        }
    }

    async fn read_document<T: DeserializeOwned + Default>(&self, filename: &str) -> Result<T> {
        let path = self.data_dir.join(filename);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| Error::Storage {
                message: format!("malformed {filename}: {e}"),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_document<T: Serialize>(&self, filename: &str, document: &T) -> Result<()> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        let json = serde_json::to_string_pretty(document)?;
        tokio::fs::write(self.data_dir.join(filename), json).await?;
        Ok(())
    }
}

#[async_trait]
impl PlantStore for JsonFileStore {
    async fn list_plants(&self) -> Result<Vec<Plant>> {
        let document: PlantsDocument = self.read_document(PLANTS_FILE).await?;
        Ok(document.plants)
    }

    async fn get_plant(&self, id: i64) -> Result<Option<Plant>> {
        let document: PlantsDocument = self.read_document(PLANTS_FILE).await?;
        Ok(document.plants.into_iter().find(|p| p.id == id))
    }

    async fn insert_plant(&self, mut plant: Plant) -> Result<Plant> {
        let _guard = self.write_lock.lock().await;

        let mut document: PlantsDocument = self.read_document(PLANTS_FILE).await?;
        plant.id = next_id(document.plants.iter().map(|p| p.id));
        document.plants.push(plant.clone());
        self.write_document(PLANTS_FILE, &document).await?;

        Ok(plant)
    }

    async fn update_plant(&self, plant: Plant) -> Result<Plant> {
        let _guard = self.write_lock.lock().await;

        let mut document: PlantsDocument = self.read_document(PLANTS_FILE).await?;
        let slot = document
            .plants
            .iter_mut()
            .find(|p| p.id == plant.id)
            .ok_or(Error::PlantNotFound { id: plant.id })?;

        *slot = plant.clone();
        self.write_document(PLANTS_FILE, &document).await?;

        Ok(plant)
    }

    async fn remove_plant(&self, id: i64) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let mut document: PlantsDocument = self.read_document(PLANTS_FILE).await?;
        let before = document.plants.len();
        document.plants.retain(|p| p.id != id);

        if document.plants.len() == before {
            return Ok(false);
        }

        self.write_document(PLANTS_FILE, &document).await?;
        Ok(true)
    }
}

#[async_trait]
impl ActionStore for JsonFileStore {
    async fn list_actions(
        &self,
        plant_id: Option<i64>,
        day: Option<NaiveDate>,
    ) -> Result<Vec<CareAction>> {
        let document: ActionsDocument = self.read_document(ACTIONS_FILE).await?;

        Ok(document
            .actions
            .into_iter()
            .filter(|a| plant_id.is_none_or(|id| a.plant_id == id))
            .filter(|a| day.is_none_or(|d| a.performed_at.date_naive() == d))
            .collect())
    }

    async fn insert_action(&self, mut action: CareAction) -> Result<CareAction> {
        let _guard = self.write_lock.lock().await;

        let mut document: ActionsDocument = self.read_document(ACTIONS_FILE).await?;
        action.id = next_id(document.actions.iter().map(|a| a.id));
        document.actions.push(action.clone());
        self.write_document(ACTIONS_FILE, &document).await?;

        Ok(action)
    }
}
