//! Group settings factory for creating boss reminder configuration rows.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating group settings with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let settings = GroupSettingsFactory::new(&db)
///     .guild_id("123")
///     .channel_id("456")
///     .build()
///     .await?;
/// ```
pub struct GroupSettingsFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    channel_id: String,
    role_id: String,
}

impl<'a> GroupSettingsFactory<'a> {
    /// Creates a new factory with unique guild, channel, and role ids.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id().to_string(),
            channel_id: next_id().to_string(),
            role_id: next_id().to_string(),
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    pub fn role_id(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = role_id.into();
        self
    }

    /// Builds and inserts the settings row.
    ///
    /// # Returns
    /// - `Ok(entity::group_settings::Model)` - Created row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::group_settings::Model, DbErr> {
        entity::group_settings::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            role_id: ActiveValue::Set(self.role_id),
        }
        .insert(self.db)
        .await
    }
}

/// Creates group settings with default values.
///
/// Shorthand for `GroupSettingsFactory::new(db).build().await`.
pub async fn create_group_settings(
    db: &DatabaseConnection,
) -> Result<entity::group_settings::Model, DbErr> {
    GroupSettingsFactory::new(db).build().await
}
