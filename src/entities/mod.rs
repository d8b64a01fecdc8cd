//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod care_action;
pub mod plant;

// Re-export specific types to avoid conflicts
pub use care_action::{Column as CareActionColumn, Entity as CareAction, Model as CareActionModel};
pub use plant::{Column as PlantColumn, Entity as Plant, Model as PlantModel};
