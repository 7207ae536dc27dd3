use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    error::AppError,
    model::cycle::{CycleRecord, SaveCycleParam},
};

/// Access to the single active archboss cycle row.
pub struct CycleStateRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CycleStateRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the active cycle row, if one was ever saved.
    ///
    /// Should more than one row be flagged active, the newest wins.
    pub async fn get_active(&self) -> Result<Option<CycleRecord>, AppError> {
        entity::prelude::CycleState::find()
            .filter(entity::cycle_state::Column::Active.eq(true))
            .order_by_desc(entity::cycle_state::Column::Id)
            .one(self.db)
            .await?
            .map(CycleRecord::from_entity)
            .transpose()
    }

    /// Stores the cycle state and the occurrence it labels.
    ///
    /// Updates the active row in place, inserting it on first use.
    pub async fn save(&self, param: SaveCycleParam) -> Result<CycleRecord, AppError> {
        let existing = entity::prelude::CycleState::find()
            .filter(entity::cycle_state::Column::Active.eq(true))
            .order_by_desc(entity::cycle_state::Column::Id)
            .one(self.db)
            .await?;

        let model = match existing {
            Some(model) => {
                let mut active_model: entity::cycle_state::ActiveModel = model.into();
                active_model.state = ActiveValue::Set(param.state.as_str().to_string());
                active_model.occurrence = ActiveValue::Set(Some(param.occurrence));
                active_model.update(self.db).await?
            }
            None => {
                entity::cycle_state::ActiveModel {
                    state: ActiveValue::Set(param.state.as_str().to_string()),
                    active: ActiveValue::Set(true),
                    occurrence: ActiveValue::Set(Some(param.occurrence)),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        CycleRecord::from_entity(model)
    }
}
