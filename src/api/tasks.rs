//! Upcoming task generation endpoint.

use crate::api::AppState;
use crate::core::schedule;
use crate::errors::Result;
use crate::models::TaskOccurrence;
use crate::store::PlantStore;
use axum::extract::{Query, State};
use axum::response::Json;
use chrono::Utc;
use serde::Deserialize;

/// Query parameters of `GET /tasks`.
#[derive(Debug, Deserialize)]
pub struct TasksQuery {
    /// Size of the generation window in days.
    #[serde(default = "default_window")]
    pub days: u32,
}

const fn default_window() -> u32 {
    schedule::DEFAULT_WINDOW_DAYS
}

/// `GET /tasks` - every occurrence within the window, freshly recomputed
/// from persisted plant state.
pub async fn upcoming_tasks(
    State(state): State<AppState>,
    Query(query): Query<TasksQuery>,
) -> Result<Json<Vec<TaskOccurrence>>> {
    let plants = state.store.list_plants().await?;
    let today = Utc::now().date_naive();
    Ok(Json(schedule::upcoming_tasks(&plants, today, query.days)))
}
