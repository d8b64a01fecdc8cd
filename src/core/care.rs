//! Action recorder - the guarded write path for care actions.
//!
//! Completing a care action touches two records: the plant's last-performed
//! timestamp and the append-only action log. The guard in between enforces
//! the one-action-per-kind-per-day rule. The check and the two writes are
//! sequential, not atomic: racing requests for the same plant can both pass
//! the check, and a crash between the writes leaves them out of step. That
//! matches the consistency the storage contract actually offers.

use crate::errors::{Error, Result};
use crate::models::{ActionKind, CareAction, Plant};
use crate::store::{ActionStore, PlantStore, Store};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Result of successfully recording a care action.
#[derive(Debug, Clone)]
pub struct CareOutcome {
    /// The plant with its last-performed timestamp advanced.
    pub plant: Plant,
    /// The newly logged action.
    pub action: CareAction,
}

/// Records that `kind` was performed on the plant at `now`.
///
/// Fails with [`Error::PlantNotFound`] for an unknown plant, or with
/// [`Error::DuplicateAction`] carrying the conflicting record if an action of
/// the same kind was already logged on `now`'s calendar day. On the duplicate
/// path the plant is left completely untouched.
pub async fn record_care_action(
    store: &dyn Store,
    plant_id: i64,
    kind: ActionKind,
    now: DateTime<Utc>,
) -> Result<CareOutcome> {
    let mut plant = store
        .get_plant(plant_id)
        .await?
        .ok_or(Error::PlantNotFound { id: plant_id })?;

    let today = now.date_naive();
    let todays_actions = store.list_actions(Some(plant_id), Some(today)).await?;
    if let Some(existing) = todays_actions.into_iter().find(|a| a.kind == kind) {
        return Err(Error::DuplicateAction { kind, existing });
    }

    plant.set_last_performed(kind, now);
    let plant = store.update_plant(plant).await?;

    let action = store
        .insert_action(CareAction {
            id: 0,
            plant_id,
            kind,
            performed_at: now,
        })
        .await?;

    debug!("Recorded {} for plant {}", kind, plant_id);

    Ok(CareOutcome { plant, action })
}
