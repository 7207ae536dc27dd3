use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GroupSettings::Table)
                    .if_not_exists()
                    .col(string(GroupSettings::GuildId).primary_key())
                    .col(string(GroupSettings::ChannelId))
                    .col(string(GroupSettings::RoleId))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GroupSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GroupSettings {
    Table,
    GuildId,
    ChannelId,
    RoleId,
}
