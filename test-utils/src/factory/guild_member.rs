//! Guild member factory for creating roster entries.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating roster entries with customizable fields.
///
/// Defaults to a DPS wielding Greatsword and Dagger with a gear score of 3000.
///
/// # Example
///
/// ```rust,ignore
/// let member = GuildMemberFactory::new(&db)
///     .guild_id("42")
///     .ingame_name("Healbot")
///     .class("Healer")
///     .build()
///     .await?;
/// ```
pub struct GuildMemberFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: String,
    guild_id: String,
    ingame_name: String,
    gear_score: i32,
    class: String,
    main_hand: String,
    offhand: String,
}

impl<'a> GuildMemberFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            user_id: id.to_string(),
            guild_id: "1".to_string(),
            ingame_name: format!("Member{}", id),
            gear_score: 3000,
            class: "DPS".to_string(),
            main_hand: "Greatsword".to_string(),
            offhand: "Dagger".to_string(),
        }
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn ingame_name(mut self, ingame_name: impl Into<String>) -> Self {
        self.ingame_name = ingame_name.into();
        self
    }

    pub fn gear_score(mut self, gear_score: i32) -> Self {
        self.gear_score = gear_score;
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn weapons(mut self, main_hand: impl Into<String>, offhand: impl Into<String>) -> Self {
        self.main_hand = main_hand.into();
        self.offhand = offhand.into();
        self
    }

    /// Builds and inserts the roster entry.
    ///
    /// # Returns
    /// - `Ok(entity::guild_member::Model)` - Created row
    /// - `Err(DbErr)` - Database error during insert (e.g. duplicate user/guild key)
    pub async fn build(self) -> Result<entity::guild_member::Model, DbErr> {
        entity::guild_member::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            guild_id: ActiveValue::Set(self.guild_id),
            ingame_name: ActiveValue::Set(self.ingame_name),
            gear_score: ActiveValue::Set(self.gear_score),
            class: ActiveValue::Set(self.class),
            main_hand: ActiveValue::Set(self.main_hand),
            offhand: ActiveValue::Set(self.offhand),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a roster entry in the given guild with default values.
pub async fn create_guild_member(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::guild_member::Model, DbErr> {
    GuildMemberFactory::new(db).guild_id(guild_id).build().await
}
