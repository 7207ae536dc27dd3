use sea_orm::DatabaseConnection;

use crate::{
    data::group_settings::GroupSettingsRepository, error::AppError,
    model::group_settings::GroupSettings,
};

pub struct BossSettingsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BossSettingsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sets the reminder channel and notify role for a guild, replacing any previous choice.
    pub async fn configure(
        &self,
        guild_id: u64,
        channel_id: u64,
        role_id: u64,
    ) -> Result<GroupSettings, AppError> {
        let settings = GroupSettingsRepository::new(self.db)
            .upsert(&GroupSettings {
                guild_id,
                channel_id,
                role_id,
            })
            .await?;

        tracing::info!(
            guild_id,
            channel_id,
            role_id,
            "Boss reminder settings updated"
        );

        Ok(settings)
    }

    pub async fn get(&self, guild_id: u64) -> Result<Option<GroupSettings>, AppError> {
        GroupSettingsRepository::new(self.db)
            .find_by_guild_id(guild_id)
            .await
    }

    /// Gets a guild's settings, failing with a user-facing message when none exist.
    pub async fn require(&self, guild_id: u64) -> Result<GroupSettings, AppError> {
        self.get(guild_id).await?.ok_or_else(|| {
            AppError::NotFound(
                "No boss reminder settings found for this server. Please set up the boss reminder channel and role first."
                    .to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, error::TestError};

    #[tokio::test]
    async fn require_reports_missing_settings() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::GroupSettings)
            .build()
            .await?;
        let db = test.db.as_ref().unwrap();

        let service = BossSettingsService::new(db);
        let err = service.require(1).await.unwrap_err();
        assert!(err.user_message().starts_with("No boss reminder settings"));

        service.configure(1, 2, 3).await.unwrap();
        assert_eq!(service.require(1).await.unwrap().role_id, 3);

        Ok(())
    }
}
