//! Care action entity - Represents every logged care action in the system.
//!
//! Each action has a `plant_id`, a `kind` (`"watering"` or `"misting"`), and a
//! `performed_at` timestamp. Rows are append-only: the action recorder creates
//! them and nothing through the modeled interface mutates or deletes them.
//! Backticks are used for field names to enable proper documentation linking.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Care action database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "care_actions")]
pub struct Model {
    /// Unique identifier for the action
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the plant this action was performed on
    pub plant_id: i64,
    /// Kind of action: `"watering"` or `"misting"`
    pub kind: String,
    /// When the action was performed
    pub performed_at: DateTimeUtc,
}

/// Defines relationships between CareAction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each care action belongs to one plant
    #[sea_orm(
        belongs_to = "super::plant::Entity",
        from = "Column::PlantId",
        to = "super::plant::Column::Id"
    )]
    Plant,
}

impl Related<super::plant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
