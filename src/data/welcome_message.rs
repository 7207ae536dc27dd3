use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};

use crate::{error::AppError, model::welcome_message::WelcomeMessage};

pub struct WelcomeMessageRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WelcomeMessageRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates or replaces a guild's welcome message.
    pub async fn upsert(&self, guild_id: u64, message: String) -> Result<WelcomeMessage, AppError> {
        let model =
            entity::prelude::WelcomeMessage::insert(entity::welcome_message::ActiveModel {
                guild_id: ActiveValue::Set(guild_id.to_string()),
                message: ActiveValue::Set(message),
            })
            .on_conflict(
                OnConflict::column(entity::welcome_message::Column::GuildId)
                    .update_column(entity::welcome_message::Column::Message)
                    .to_owned(),
            )
            .exec_with_returning(self.db)
            .await?;

        WelcomeMessage::from_entity(model)
    }

    pub async fn find_by_guild_id(
        &self,
        guild_id: u64,
    ) -> Result<Option<WelcomeMessage>, AppError> {
        entity::prelude::WelcomeMessage::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?
            .map(WelcomeMessage::from_entity)
            .transpose()
    }
}
