//! Plant CRUD endpoints.

use crate::api::{AppJson, AppState};
use crate::core;
use crate::errors::{Error, Result};
use crate::models::{NewPlant, Plant, PlantPatch};
use crate::store::PlantStore;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::Utc;
use serde::Serialize;

/// Body of a successful `DELETE /plants/{id}`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Always true; absent plants are reported as 404 instead.
    pub success: bool,
    /// Id of the removed plant.
    pub id: i64,
}

/// `GET /plants` - all plants.
pub async fn list_plants(State(state): State<AppState>) -> Result<Json<Vec<Plant>>> {
    Ok(Json(state.store.list_plants().await?))
}

/// `GET /plants/{id}` - one plant, or 404.
pub async fn get_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Plant>> {
    state
        .store
        .get_plant(id)
        .await?
        .map(Json)
        .ok_or(Error::PlantNotFound { id })
}

/// `POST /plants` - create a plant, 201 on success.
pub async fn create_plant(
    State(state): State<AppState>,
    AppJson(new): AppJson<NewPlant>,
) -> Result<(StatusCode, Json<Plant>)> {
    let plant = core::plant::create_plant(state.store.as_ref(), new, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(plant)))
}

/// `PUT /plants/{id}` - merge the provided fields into the stored plant.
pub async fn update_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(patch): AppJson<PlantPatch>,
) -> Result<Json<Plant>> {
    let plant = core::plant::update_plant(state.store.as_ref(), id, patch).await?;
    Ok(Json(plant))
}

/// `DELETE /plants/{id}` - remove a plant, 404 if absent.
pub async fn delete_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    if state.store.remove_plant(id).await? {
        Ok(Json(DeleteResponse { success: true, id }))
    } else {
        Err(Error::PlantNotFound { id })
    }
}
