//! Shared test utilities for `PlantBuddy`.
//!
//! This module provides common helper functions for setting up test stores
//! and creating test plants with sensible defaults.

use crate::errors::Result;
use crate::models::{NewPlant, Plant};
use crate::store::{Store, sqlite};

/// Creates an in-memory `SQLite` store with all tables initialized.
/// This is the standard setup for store-backed tests.
pub async fn setup_test_store() -> Result<sqlite::SqliteStore> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    sqlite::create_tables(&db).await?;
    Ok(sqlite::SqliteStore::new(db))
}

/// A create payload with sensible defaults.
///
/// # Defaults
/// * `watering_interval_days`: 7
/// * `misting_interval_days`: 3
/// * last-performed timestamps: unset (default to "now" at create time)
#[must_use]
pub fn new_plant_payload(name: &str) -> NewPlant {
    NewPlant {
        name: name.to_string(),
        species: None,
        image: None,
        image_name: None,
        watering_interval_days: 7,
        misting_interval_days: 3,
        last_watered: None,
        last_misted: None,
        notes: None,
    }
}

/// Creates a test plant with sensible defaults.
pub async fn create_test_plant(store: &dyn Store, name: &str) -> Result<Plant> {
    crate::core::plant::create_plant(store, new_plant_payload(name), chrono::Utc::now()).await
}

/// Creates a test plant with custom intervals.
/// Use this when a test needs a specific schedule shape.
pub async fn create_plant_with_intervals(
    store: &dyn Store,
    name: &str,
    watering_interval_days: u32,
    misting_interval_days: u32,
) -> Result<Plant> {
    let mut payload = new_plant_payload(name);
    payload.watering_interval_days = watering_interval_days;
    payload.misting_interval_days = misting_interval_days;
    crate::core::plant::create_plant(store, payload, chrono::Utc::now()).await
}
