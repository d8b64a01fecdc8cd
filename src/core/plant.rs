//! Plant business logic - Handles validated plant creation and updates.
//!
//! Reads and deletes go straight to the repository; what lives here is the
//! validation both write paths share and the merge semantics of partial
//! updates. All functions are async and return Result types for error
//! handling.

use crate::errors::{Error, Result};
use crate::models::{NewPlant, Plant, PlantPatch};
use crate::store::{PlantStore, Store};
use chrono::{DateTime, Utc};

/// Creates a new plant with the specified fields, performing input validation.
///
/// The name is trimmed and must be non-empty; both intervals must be at least
/// one day. Missing last-performed timestamps default to `now`, so a freshly
/// added plant starts a full interval away from its first task.
pub async fn create_plant(store: &dyn Store, new: NewPlant, now: DateTime<Utc>) -> Result<Plant> {
    let name = new.name.trim().to_string();
    validate(&name, new.watering_interval_days, new.misting_interval_days)?;

    let plant = Plant {
        id: 0,
        name,
        species: new.species,
        image: new.image,
        image_name: new.image_name,
        watering_interval_days: new.watering_interval_days,
        misting_interval_days: new.misting_interval_days,
        last_watered: new.last_watered.unwrap_or(now),
        last_misted: new.last_misted.unwrap_or(now),
        notes: new.notes,
    };

    store.insert_plant(plant).await
}

/// Applies a partial update to an existing plant.
///
/// Omitted fields keep their stored values; the merged result is re-validated
/// before being written back. Fails with [`Error::PlantNotFound`] if the
/// plant does not exist.
pub async fn update_plant(store: &dyn Store, id: i64, patch: PlantPatch) -> Result<Plant> {
    let mut plant = store
        .get_plant(id)
        .await?
        .ok_or(Error::PlantNotFound { id })?;

    if let Some(name) = patch.name {
        plant.name = name.trim().to_string();
    }
    if let Some(species) = patch.species {
        plant.species = Some(species);
    }
    if let Some(image) = patch.image {
        plant.image = Some(image);
    }
    if let Some(image_name) = patch.image_name {
        plant.image_name = Some(image_name);
    }
    if let Some(days) = patch.watering_interval_days {
        plant.watering_interval_days = days;
    }
    if let Some(days) = patch.misting_interval_days {
        plant.misting_interval_days = days;
    }
    if let Some(last_watered) = patch.last_watered {
        plant.last_watered = last_watered;
    }
    if let Some(last_misted) = patch.last_misted {
        plant.last_misted = last_misted;
    }
    if let Some(notes) = patch.notes {
        plant.notes = Some(notes);
    }

    validate(
        &plant.name,
        plant.watering_interval_days,
        plant.misting_interval_days,
    )?;

    store.update_plant(plant).await
}

fn validate(name: &str, watering_interval_days: u32, misting_interval_days: u32) -> Result<()> {
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Plant name cannot be empty".to_string(),
        });
    }
    if watering_interval_days < 1 {
        return Err(Error::Validation {
            message: "wateringIntervalDays must be at least 1".to_string(),
        });
    }
    if misting_interval_days < 1 {
        return Err(Error::Validation {
            message: "mistingIntervalDays must be at least 1".to_string(),
        });
    }
    Ok(())
}
