//! Poll record factory for creating posted poll/drop message rows.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a drop poll record with the given options.
///
/// Message, channel, and guild ids are generated. Options are stored as a JSON array
/// the same way the poll repository writes them.
///
/// # Arguments
/// - `db` - Database connection
/// - `options` - Ordered option labels, one per reaction slot
///
/// # Returns
/// - `Ok(entity::poll_record::Model)` - Created row
/// - `Err(DbErr)` - Database error during insert
pub async fn create_poll_record(
    db: &DatabaseConnection,
    options: &[&str],
) -> Result<entity::poll_record::Model, DbErr> {
    entity::poll_record::ActiveModel {
        message_id: ActiveValue::Set(next_id().to_string()),
        channel_id: ActiveValue::Set(next_id().to_string()),
        guild_id: ActiveValue::Set(next_id().to_string()),
        kind: ActiveValue::Set("drops".to_string()),
        options: ActiveValue::Set(serde_json::json!(options).to_string()),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
