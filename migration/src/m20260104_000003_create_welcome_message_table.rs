use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WelcomeMessage::Table)
                    .if_not_exists()
                    .col(string(WelcomeMessage::GuildId).primary_key())
                    .col(text(WelcomeMessage::Message))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WelcomeMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum WelcomeMessage {
    Table,
    GuildId,
    Message,
}
