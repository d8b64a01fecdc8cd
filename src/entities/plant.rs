//! Plant entity - Represents a tracked houseplant and its care schedule.
//!
//! Each plant carries its watering and misting intervals together with the
//! timestamps of the most recent action of each kind, which is all the state
//! the scheduling calculator needs.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Plant database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plants")]
pub struct Model {
    /// Unique identifier for the plant
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the plant (e.g., "Monstera", "Kitchen Basil")
    pub name: String,
    /// Botanical or common species name, if known
    pub species: Option<String>,
    /// Base64-encoded image or image URL
    pub image: Option<String>,
    /// Original filename of an uploaded image
    pub image_name: Option<String>,
    /// Days between waterings (at least 1)
    pub watering_interval_days: i32,
    /// Days between mistings (at least 1)
    pub misting_interval_days: i32,
    /// When the plant was last watered
    pub last_watered: DateTimeUtc,
    /// When the plant was last misted
    pub last_misted: DateTimeUtc,
    /// Free-form care notes
    pub notes: Option<String>,
}

/// Defines relationships between Plant and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One plant has many logged care actions
    #[sea_orm(has_many = "super::care_action::Entity")]
    CareActions,
}

impl Related<super::care_action::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CareActions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
