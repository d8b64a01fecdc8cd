//! Backend-neutral domain models.
//!
//! These types are what the storage traits, the scheduling core, and the HTTP
//! API exchange. The `SQLite` backend converts them to and from its entity
//! models; the document backends persist them as-is. Wire and file
//! representations use camelCase field names and RFC 3339 timestamps.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The two kinds of recurring care a plant receives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Watering the plant's soil.
    Watering,
    /// Misting the plant's leaves.
    Misting,
}

impl ActionKind {
    /// Canonical lowercase name, matching the wire and storage encoding.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Watering => "watering",
            Self::Misting => "misting",
        }
    }

    /// Past-tense verb for user-facing messages ("watered", "misted").
    #[must_use]
    pub const fn past_tense(self) -> &'static str {
        match self {
            Self::Watering => "watered",
            Self::Misting => "misted",
        }
    }

    /// Parses the lowercase wire encoding, returning `None` for anything else.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "watering" => Some(Self::Watering),
            "misting" => Some(Self::Misting),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked houseplant with its care schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    /// Unique identifier, assigned by the storage backend.
    pub id: i64,
    /// Human-readable name of the plant.
    pub name: String,
    /// Botanical or common species name, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    /// Base64-encoded image or image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Original filename of an uploaded image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    /// Days between waterings (at least 1).
    pub watering_interval_days: u32,
    /// Days between mistings (at least 1).
    pub misting_interval_days: u32,
    /// When the plant was last watered.
    pub last_watered: DateTime<Utc>,
    /// When the plant was last misted.
    pub last_misted: DateTime<Utc>,
    /// Free-form care notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Plant {
    /// Interval in days for the given care kind.
    #[must_use]
    pub const fn interval_days(&self, kind: ActionKind) -> u32 {
        match kind {
            ActionKind::Watering => self.watering_interval_days,
            ActionKind::Misting => self.misting_interval_days,
        }
    }

    /// When the given care kind was last performed.
    #[must_use]
    pub const fn last_performed(&self, kind: ActionKind) -> DateTime<Utc> {
        match kind {
            ActionKind::Watering => self.last_watered,
            ActionKind::Misting => self.last_misted,
        }
    }

    /// Records that the given care kind was performed at `when`.
    pub const fn set_last_performed(&mut self, kind: ActionKind, when: DateTime<Utc>) {
        match kind {
            ActionKind::Watering => self.last_watered = when,
            ActionKind::Misting => self.last_misted = when,
        }
    }
}

/// Payload for creating a plant, before a backend has assigned an id.
///
/// Missing last-performed timestamps default to "now" at create time, so a
/// freshly added plant is not immediately overdue for everything.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlant {
    /// Human-readable name, required and non-empty.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_name: Option<String>,
    /// Days between waterings, required and at least 1.
    #[serde(default)]
    pub watering_interval_days: u32,
    /// Days between mistings, required and at least 1.
    #[serde(default)]
    pub misting_interval_days: u32,
    #[serde(default)]
    pub last_watered: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_misted: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update for an existing plant; omitted fields keep their values.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_name: Option<String>,
    #[serde(default)]
    pub watering_interval_days: Option<u32>,
    #[serde(default)]
    pub misting_interval_days: Option<u32>,
    #[serde(default)]
    pub last_watered: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_misted: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A logged care action. Created only by the action recorder, never edited.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareAction {
    /// Unique identifier, assigned by the storage backend.
    pub id: i64,
    /// The plant this action was performed on.
    pub plant_id: i64,
    /// What was done.
    pub kind: ActionKind,
    /// When it was done.
    pub performed_at: DateTime<Utc>,
}

/// A single scheduled instance of a recurring care action on a calendar day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOccurrence {
    /// The plant the task belongs to.
    pub plant_id: i64,
    /// Plant name, denormalized for display.
    pub plant_name: String,
    /// What needs doing.
    pub kind: ActionKind,
    /// The calendar day the task falls on.
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_action_kind_round_trip() {
        assert_eq!(ActionKind::parse("watering"), Some(ActionKind::Watering));
        assert_eq!(ActionKind::parse("misting"), Some(ActionKind::Misting));
        assert_eq!(ActionKind::parse("pruning"), None);
        assert_eq!(ActionKind::parse("Watering"), None);

        assert_eq!(ActionKind::Watering.as_str(), "watering");
        assert_eq!(ActionKind::Misting.past_tense(), "misted");
    }

    #[test]
    fn test_action_kind_serde_encoding() {
        let json = serde_json::to_string(&ActionKind::Watering).unwrap();
        assert_eq!(json, "\"watering\"");

        let kind: ActionKind = serde_json::from_str("\"misting\"").unwrap();
        assert_eq!(kind, ActionKind::Misting);
    }

    #[test]
    fn test_plant_wire_field_names() {
        let plant = Plant {
            id: 1,
            name: "Monstera".to_string(),
            species: None,
            image: None,
            image_name: None,
            watering_interval_days: 7,
            misting_interval_days: 3,
            last_watered: Utc::now(),
            last_misted: Utc::now(),
            notes: None,
        };

        let value = serde_json::to_value(&plant).unwrap();
        assert!(value.get("wateringIntervalDays").is_some());
        assert!(value.get("lastWatered").is_some());
        // Empty optionals are omitted entirely
        assert!(value.get("species").is_none());
    }

    #[test]
    fn test_set_last_performed_touches_one_field() {
        let before = Utc::now();
        let mut plant = Plant {
            id: 1,
            name: "Fern".to_string(),
            species: None,
            image: None,
            image_name: None,
            watering_interval_days: 7,
            misting_interval_days: 3,
            last_watered: before,
            last_misted: before,
            notes: None,
        };

        let later = before + chrono::Duration::hours(6);
        plant.set_last_performed(ActionKind::Watering, later);
        assert_eq!(plant.last_watered, later);
        assert_eq!(plant.last_misted, before);
    }
}
