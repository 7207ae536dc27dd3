use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};

use crate::{error::AppError, model::group_settings::GroupSettings};

pub struct GroupSettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GroupSettingsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates or replaces the reminder configuration for a guild.
    ///
    /// # Arguments
    /// - `settings` - Guild, announcement channel, and notify role
    ///
    /// # Returns
    /// - `Ok(GroupSettings)` - The stored configuration
    /// - `Err(AppError::DbErr)` - Database error during upsert
    pub async fn upsert(&self, settings: &GroupSettings) -> Result<GroupSettings, AppError> {
        let model = entity::prelude::GroupSettings::insert(entity::group_settings::ActiveModel {
            guild_id: ActiveValue::Set(settings.guild_id.to_string()),
            channel_id: ActiveValue::Set(settings.channel_id.to_string()),
            role_id: ActiveValue::Set(settings.role_id.to_string()),
        })
        .on_conflict(
            OnConflict::column(entity::group_settings::Column::GuildId)
                .update_columns([
                    entity::group_settings::Column::ChannelId,
                    entity::group_settings::Column::RoleId,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        GroupSettings::from_entity(model)
    }

    pub async fn find_by_guild_id(&self, guild_id: u64) -> Result<Option<GroupSettings>, AppError> {
        entity::prelude::GroupSettings::find_by_id(guild_id.to_string())
            .one(self.db)
            .await?
            .map(GroupSettings::from_entity)
            .transpose()
    }

    /// Gets the configuration of every guild that has reminders set up.
    ///
    /// Rows that fail to convert are logged and skipped so one corrupted guild never hides
    /// the others from the reminder tick.
    pub async fn get_all(&self) -> Result<Vec<GroupSettings>, AppError> {
        let models = entity::prelude::GroupSettings::find().all(self.db).await?;

        Ok(models
            .into_iter()
            .filter_map(|model| match GroupSettings::from_entity(model) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    tracing::error!("Skipping unreadable group settings row: {}", e);
                    None
                }
            })
            .collect())
    }
}
