use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CycleState::Table)
                    .if_not_exists()
                    .col(pk_auto(CycleState::Id))
                    .col(string(CycleState::State))
                    .col(boolean(CycleState::Active).default(true))
                    .col(timestamp_with_time_zone_null(CycleState::Occurrence))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CycleState::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CycleState {
    Table,
    Id,
    State,
    Active,
    Occurrence,
}
