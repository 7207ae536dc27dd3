pub use sea_orm_migration::prelude::*;

mod m20260104_000001_create_group_settings_table;
mod m20260104_000002_create_guild_member_table;
mod m20260104_000003_create_welcome_message_table;
mod m20260105_000004_create_cycle_state_table;
mod m20260107_000005_create_poll_record_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260104_000001_create_group_settings_table::Migration),
            Box::new(m20260104_000002_create_guild_member_table::Migration),
            Box::new(m20260104_000003_create_welcome_message_table::Migration),
            Box::new(m20260105_000004_create_cycle_state_table::Migration),
            Box::new(m20260107_000005_create_poll_record_table::Migration),
        ]
    }
}
