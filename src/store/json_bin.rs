//! Remote JSON bin storage backend.
//!
//! Persists the same wrapped documents as the file backend, but in two bins
//! of a jsonbin.io-style document service: reads hit `GET {base}/{bin}/latest`
//! and writes replace the whole document with `PUT {base}/{bin}`, both
//! authenticated with an `X-Master-Key` header. `X-Bin-Meta: false` asks the
//! service to return the bare record without its metadata envelope.
//!
//! Like the file backend, mutations hold a mutex across the remote
//! read-modify-write cycle; racing processes are still last-write-wins.

use crate::config::JsonBinSettings;
use crate::errors::{Error, Result};
use crate::models::{CareAction, Plant};
use crate::store::{ActionStore, PlantStore, next_id};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;

/// Top-level shape of the plants bin.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PlantsDocument {
    #[serde(default)]
    plants: Vec<Plant>,
}

/// Top-level shape of the actions bin.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ActionsDocument {
    #[serde(default)]
    actions: Vec<CareAction>,
}

/// Storage backend over a remote JSON bin service.
pub struct JsonBinStore {
    client: reqwest::Client,
    settings: JsonBinSettings,
    write_lock: Mutex<()>,
}

impl JsonBinStore {
    /// Builds the HTTP client for the configured bin service.
    pub fn new(settings: JsonBinSettings) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            settings,
            write_lock: Mutex::new(()),
        })
    }

    async fn read_bin<T: DeserializeOwned + Default>(&self, bin_id: &str) -> Result<T> {
        let url = format!("{}/{}/latest", self.settings.api_url, bin_id);
        let response = self
            .client
            .get(&url)
            .header("X-Master-Key", &self.settings.api_key)
            .header("X-Bin-Meta", "false")
            .send()
            .await?;

        // An empty or not-yet-created bin reads as an empty collection
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(T::default());
        }
        if !response.status().is_success() {
            return Err(Error::Storage {
                message: format!("bin {bin_id} read failed: HTTP {}", response.status()),
            });
        }

        Ok(response.json().await?)
    }

    async fn write_bin<T: Serialize>(&self, bin_id: &str, document: &T) -> Result<()> {
        let url = format!("{}/{}", self.settings.api_url, bin_id);
        let response = self
            .client
            .put(&url)
            .header("X-Master-Key", &self.settings.api_key)
            .header("X-Bin-Meta", "false")
            .json(document)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Storage {
                message: format!("bin {bin_id} update failed: HTTP {}", response.status()),
            });
        }

        Ok(())
    }

    async fn read_plants(&self) -> Result<PlantsDocument> {
        self.read_bin(&self.settings.plants_bin_id).await
    }

    async fn read_actions(&self) -> Result<ActionsDocument> {
        self.read_bin(&self.settings.actions_bin_id).await
    }
}

#[async_trait]
impl PlantStore for JsonBinStore {
    async fn list_plants(&self) -> Result<Vec<Plant>> {
        Ok(self.read_plants().await?.plants)
    }

    async fn get_plant(&self, id: i64) -> Result<Option<Plant>> {
        let document = self.read_plants().await?;
        Ok(document.plants.into_iter().find(|p| p.id == id))
    }

    async fn insert_plant(&self, mut plant: Plant) -> Result<Plant> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.read_plants().await?;
        plant.id = next_id(document.plants.iter().map(|p| p.id));
        document.plants.push(plant.clone());
        self.write_bin(&self.settings.plants_bin_id, &document)
            .await?;

        Ok(plant)
    }

    async fn update_plant(&self, plant: Plant) -> Result<Plant> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.read_plants().await?;
        let slot = document
            .plants
            .iter_mut()
            .find(|p| p.id == plant.id)
            .ok_or(Error::PlantNotFound { id: plant.id })?;

        *slot = plant.clone();
        self.write_bin(&self.settings.plants_bin_id, &document)
            .await?;

        Ok(plant)
    }

    async fn remove_plant(&self, id: i64) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.read_plants().await?;
        let before = document.plants.len();
        document.plants.retain(|p| p.id != id);

        if document.plants.len() == before {
            return Ok(false);
        }

        self.write_bin(&self.settings.plants_bin_id, &document)
            .await?;
        Ok(true)
    }
}

#[async_trait]
impl ActionStore for JsonBinStore {
    async fn list_actions(
        &self,
        plant_id: Option<i64>,
        day: Option<NaiveDate>,
    ) -> Result<Vec<CareAction>> {
        let document = self.read_actions().await?;

        Ok(document
            .actions
            .into_iter()
            .filter(|a| plant_id.is_none_or(|id| a.plant_id == id))
            .filter(|a| day.is_none_or(|d| a.performed_at.date_naive() == d))
            .collect())
    }

    async fn insert_action(&self, mut action: CareAction) -> Result<CareAction> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.read_actions().await?;
        action.id = next_id(document.actions.iter().map(|a| a.id));
        document.actions.push(action.clone());
        self.write_bin(&self.settings.actions_bin_id, &document)
            .await?;

        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn settings() -> JsonBinSettings {
        JsonBinSettings {
            api_url: "https://api.jsonbin.io/v3/b".to_string(),
            api_key: "master-key".to_string(),
            plants_bin_id: "plants-bin".to_string(),
            actions_bin_id: "actions-bin".to_string(),
        }
    }

    #[test]
    fn test_store_builds_from_settings() {
        assert!(JsonBinStore::new(settings()).is_ok());
    }

    #[test]
    fn test_documents_default_to_empty_collections() {
        // The shape an empty or brand-new bin deserializes into
        let plants: PlantsDocument = serde_json::from_str("{}").unwrap();
        assert!(plants.plants.is_empty());

        let actions: ActionsDocument = serde_json::from_str("{}").unwrap();
        assert!(actions.actions.is_empty());
    }
}
