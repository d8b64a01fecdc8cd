//! Care log queries and the action recorder endpoint.

use crate::api::{AppJson, AppState};
use crate::core::care;
use crate::errors::{Error, Result};
use crate::models::{ActionKind, CareAction, Plant};
use crate::store::ActionStore;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Query parameters of `GET /actions`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionsQuery {
    /// Restrict to one plant.
    pub plant_id: Option<i64>,
    /// Restrict to one UTC calendar day (`YYYY-MM-DD`).
    pub date: Option<NaiveDate>,
}

/// Body of `POST /actions`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordActionRequest {
    #[serde(default)]
    plant_id: Option<i64>,
    #[serde(default)]
    action_type: Option<String>,
}

/// Body of a successful `POST /actions`.
#[derive(Debug, Serialize)]
pub struct RecordActionResponse {
    /// Always true; failures use the error shape instead.
    pub success: bool,
    /// The plant with its last-performed timestamp advanced.
    pub plant: Plant,
    /// The newly logged action.
    pub action: CareAction,
}

/// `GET /actions` - logged care actions, optionally filtered.
pub async fn list_actions(
    State(state): State<AppState>,
    Query(query): Query<ActionsQuery>,
) -> Result<Json<Vec<CareAction>>> {
    let actions = state
        .store
        .list_actions(query.plant_id, query.date)
        .await?;
    Ok(Json(actions))
}

/// `POST /actions` - record a care action, 201 on success, 409 if the same
/// kind was already logged for the plant today.
pub async fn record_action(
    State(state): State<AppState>,
    AppJson(request): AppJson<RecordActionRequest>,
) -> Result<(StatusCode, Json<RecordActionResponse>)> {
    let plant_id = request.plant_id.ok_or_else(|| Error::Validation {
        message: "plantId is required".to_string(),
    })?;
    let kind = request
        .action_type
        .as_deref()
        .and_then(ActionKind::parse)
        .ok_or_else(|| Error::Validation {
            message: "actionType must be \"watering\" or \"misting\"".to_string(),
        })?;

    let outcome = care::record_care_action(state.store.as_ref(), plant_id, kind, Utc::now()).await?;

    Ok((
        StatusCode::CREATED,
        Json(RecordActionResponse {
            success: true,
            plant: outcome.plant,
            action: outcome.action,
        }),
    ))
}
