use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PollRecord::Table)
                    .if_not_exists()
                    .col(string(PollRecord::MessageId).primary_key())
                    .col(string(PollRecord::ChannelId))
                    .col(string(PollRecord::GuildId))
                    .col(string(PollRecord::Kind))
                    .col(text(PollRecord::Options))
                    .col(timestamp_with_time_zone(PollRecord::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PollRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PollRecord {
    Table,
    MessageId,
    ChannelId,
    GuildId,
    Kind,
    Options,
    CreatedAt,
}
