use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    error::AppError,
    model::guild_member::{GuildMember, UpsertGuildMemberParam},
};

pub struct GuildMemberRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildMemberRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a roster entry or replaces every field of an existing one.
    ///
    /// Entries are keyed on (user, guild), so a member re-running `add_member` overwrites
    /// their previous entry.
    ///
    /// # Returns
    /// - `Ok(GuildMember)` - The stored entry
    /// - `Err(AppError::DbErr)` - Database error during upsert
    pub async fn upsert(&self, param: UpsertGuildMemberParam) -> Result<GuildMember, AppError> {
        use entity::guild_member::Column;

        let model = entity::prelude::GuildMember::insert(entity::guild_member::ActiveModel {
            user_id: ActiveValue::Set(param.user_id.to_string()),
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            ingame_name: ActiveValue::Set(param.ingame_name),
            gear_score: ActiveValue::Set(param.gear_score),
            class: ActiveValue::Set(param.class.as_str().to_string()),
            main_hand: ActiveValue::Set(param.main_hand.as_str().to_string()),
            offhand: ActiveValue::Set(param.offhand.as_str().to_string()),
        })
        .on_conflict(
            OnConflict::columns([Column::UserId, Column::GuildId])
                .update_columns([
                    Column::IngameName,
                    Column::GearScore,
                    Column::Class,
                    Column::MainHand,
                    Column::Offhand,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        GuildMember::from_entity(model)
    }

    /// Gets one page of a guild's roster, highest gear score first.
    ///
    /// Members with equal gear score are ordered by in-game name.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `page` - Zero-based page index
    /// - `per_page` - Entries per page
    ///
    /// # Returns
    /// - `Ok((members, total))` - The page and the total roster size
    /// - `Err(AppError)` - Database error or unreadable row
    pub async fn get_page_by_guild(
        &self,
        guild_id: u64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<GuildMember>, u64), AppError> {
        let paginator = entity::prelude::GuildMember::find()
            .filter(entity::guild_member::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::guild_member::Column::GearScore)
            .order_by_asc(entity::guild_member::Column::IngameName)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let members = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(GuildMember::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((members, total))
    }

    pub async fn get_all_by_guild(&self, guild_id: u64) -> Result<Vec<GuildMember>, AppError> {
        entity::prelude::GuildMember::find()
            .filter(entity::guild_member::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::guild_member::Column::GearScore)
            .order_by_asc(entity::guild_member::Column::IngameName)
            .all(self.db)
            .await?
            .into_iter()
            .map(GuildMember::from_entity)
            .collect()
    }

    /// Deletes a guild's roster entries with the given in-game name.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows deleted, zero when no entry matched
    /// - `Err(AppError::DbErr)` - Database error during deletion
    pub async fn delete_by_name(&self, guild_id: u64, ingame_name: &str) -> Result<u64, AppError> {
        let result = entity::prelude::GuildMember::delete_many()
            .filter(entity::guild_member::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::guild_member::Column::IngameName.eq(ingame_name))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
