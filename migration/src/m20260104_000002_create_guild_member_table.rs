use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuildMember::Table)
                    .if_not_exists()
                    .col(string(GuildMember::UserId))
                    .col(string(GuildMember::GuildId))
                    .col(string(GuildMember::IngameName))
                    .col(integer(GuildMember::GearScore))
                    .col(string(GuildMember::Class))
                    .col(string(GuildMember::MainHand))
                    .col(string(GuildMember::Offhand))
                    .primary_key(
                        Index::create()
                            .col(GuildMember::UserId)
                            .col(GuildMember::GuildId),
                    )
                    .to_owned(),
            )
            .await?;

        // Roster listing and removal both filter by guild
        manager
            .create_index(
                Index::create()
                    .name("idx_guild_member_guild_id")
                    .table(GuildMember::Table)
                    .col(GuildMember::GuildId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_guild_member_guild_id")
                    .table(GuildMember::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(GuildMember::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GuildMember {
    Table,
    UserId,
    GuildId,
    IngameName,
    GearScore,
    Class,
    MainHand,
    Offhand,
}
