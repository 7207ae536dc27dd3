use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait};

use crate::{
    error::AppError,
    model::poll::{CreatePollParam, PollRecord},
};

pub struct PollRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PollRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a posted poll so its reactions can be tallied later.
    ///
    /// Options are stored as a JSON array in slot order.
    pub async fn create(&self, param: CreatePollParam) -> Result<PollRecord, AppError> {
        let options = serde_json::Value::from(param.options).to_string();

        let model = entity::poll_record::ActiveModel {
            message_id: ActiveValue::Set(param.message_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            kind: ActiveValue::Set(param.kind.as_str().to_string()),
            options: ActiveValue::Set(options),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        PollRecord::from_entity(model)
    }

    pub async fn find_by_message_id(&self, message_id: u64) -> Result<Option<PollRecord>, AppError> {
        entity::prelude::PollRecord::find_by_id(message_id.to_string())
            .one(self.db)
            .await?
            .map(PollRecord::from_entity)
            .transpose()
    }
}
