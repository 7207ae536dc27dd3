use sea_orm::DatabaseConnection;
use serenity::all::{Context, CreateMessage, Member};

use crate::service::welcome::WelcomeService;

/// Handles the guild_member_addition event when a member joins a guild
///
/// Sends the guild's welcome message, if one is set, as a direct message. Members who do
/// not accept DMs are skipped with a warning.
pub async fn handle_guild_member_addition(db: &DatabaseConnection, ctx: Context, new_member: Member) {
    if new_member.user.bot {
        return;
    }

    let guild_id = new_member.guild_id.get();

    let welcome = match WelcomeService::new(db).get(guild_id).await {
        Ok(Some(welcome)) => welcome,
        Ok(None) => return,
        Err(e) => {
            tracing::error!(guild_id, "Failed to load welcome message: {}", e);
            return;
        }
    };

    let message = CreateMessage::new().content(welcome.message);

    match new_member.user.direct_message(&ctx, message).await {
        Ok(_) => tracing::debug!(
            guild_id,
            user_id = new_member.user.id.get(),
            "Sent welcome message"
        ),
        Err(e) => tracing::warn!(
            guild_id,
            user_id = new_member.user.id.get(),
            "Could not send welcome message: {}",
            e
        ),
    }
}
