//! `SQLite` storage backend.
//!
//! The default backend. Tables are created from the entity definitions using
//! `SeaORM`'s `Schema::create_table_from_entity`, so the database schema
//! matches the Rust struct definitions without manual SQL. Ids come from
//! `SQLite` autoincrement.

use crate::entities::{self, care_action, plant};
use crate::errors::{Error, Result};
use crate::models::{ActionKind, CareAction, Plant};
use crate::store::{ActionStore, PlantStore};
use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveValue::NotSet, Database, DatabaseConnection, QueryOrder, Schema, Set, prelude::*,
};

/// Storage backend over a `SeaORM` `SQLite` connection.
pub struct SqliteStore {
    db: DatabaseConnection,
}

impl SqliteStore {
    /// Connects to `database_url` and ensures the tables exist.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let db = Database::connect(database_url).await?;
        create_tables(&db).await?;
        Ok(Self { db })
    }

    /// Wraps an existing connection whose tables are already created.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Creates the `plants` and `care_actions` tables from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let plant_table = schema.create_table_from_entity(entities::Plant);
    let action_table = schema.create_table_from_entity(entities::CareAction);

    db.execute(builder.build(&plant_table)).await?;
    db.execute(builder.build(&action_table)).await?;

    Ok(())
}

fn plant_from_model(model: plant::Model) -> Plant {
    Plant {
        id: model.id,
        name: model.name,
        species: model.species,
        image: model.image,
        image_name: model.image_name,
        watering_interval_days: u32::try_from(model.watering_interval_days).unwrap_or(0),
        misting_interval_days: u32::try_from(model.misting_interval_days).unwrap_or(0),
        last_watered: model.last_watered,
        last_misted: model.last_misted,
        notes: model.notes,
    }
}

fn plant_to_active_model(plant: Plant, keep_id: bool) -> plant::ActiveModel {
    plant::ActiveModel {
        id: if keep_id { Set(plant.id) } else { NotSet },
        name: Set(plant.name),
        species: Set(plant.species),
        image: Set(plant.image),
        image_name: Set(plant.image_name),
        watering_interval_days: Set(i32::try_from(plant.watering_interval_days).unwrap_or(i32::MAX)),
        misting_interval_days: Set(i32::try_from(plant.misting_interval_days).unwrap_or(i32::MAX)),
        last_watered: Set(plant.last_watered),
        last_misted: Set(plant.last_misted),
        notes: Set(plant.notes),
    }
}

fn action_from_model(model: care_action::Model) -> Result<CareAction> {
    let kind = ActionKind::parse(&model.kind).ok_or_else(|| Error::Storage {
        message: format!("unrecognized action kind {:?} in storage", model.kind),
    })?;

    Ok(CareAction {
        id: model.id,
        plant_id: model.plant_id,
        kind,
        performed_at: model.performed_at,
    })
}

/// UTC day bounds `[start, end)` for a calendar-day filter.
fn day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_time(NaiveTime::MIN).and_utc();
    let end = (day + Days::new(1)).and_time(NaiveTime::MIN).and_utc();
    (start, end)
}

#[async_trait]
impl PlantStore for SqliteStore {
    async fn list_plants(&self) -> Result<Vec<Plant>> {
        let models = entities::Plant::find()
            .order_by_asc(plant::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(plant_from_model).collect())
    }

    async fn get_plant(&self, id: i64) -> Result<Option<Plant>> {
        let model = entities::Plant::find_by_id(id).one(&self.db).await?;
        Ok(model.map(plant_from_model))
    }

    async fn insert_plant(&self, plant: Plant) -> Result<Plant> {
        let model = plant_to_active_model(plant, false).insert(&self.db).await?;
        Ok(plant_from_model(model))
    }

    async fn update_plant(&self, plant: Plant) -> Result<Plant> {
        let id = plant.id;
        entities::Plant::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(Error::PlantNotFound { id })?;

        let model = plant_to_active_model(plant, true).update(&self.db).await?;
        Ok(plant_from_model(model))
    }

    async fn remove_plant(&self, id: i64) -> Result<bool> {
        let result = entities::Plant::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl ActionStore for SqliteStore {
    async fn list_actions(
        &self,
        plant_id: Option<i64>,
        day: Option<NaiveDate>,
    ) -> Result<Vec<CareAction>> {
        let mut query = entities::CareAction::find().order_by_asc(care_action::Column::Id);

        if let Some(plant_id) = plant_id {
            query = query.filter(care_action::Column::PlantId.eq(plant_id));
        }
        if let Some(day) = day {
            let (start, end) = day_bounds(day);
            query = query
                .filter(care_action::Column::PerformedAt.gte(start))
                .filter(care_action::Column::PerformedAt.lt(end));
        }

        let models = query.all(&self.db).await?;
        models.into_iter().map(action_from_model).collect()
    }

    async fn insert_action(&self, action: CareAction) -> Result<CareAction> {
        let model = care_action::ActiveModel {
            id: NotSet,
            plant_id: Set(action.plant_id),
            kind: Set(action.kind.as_str().to_string()),
            performed_at: Set(action.performed_at),
        }
        .insert(&self.db)
        .await?;

        action_from_model(model)
    }
}
