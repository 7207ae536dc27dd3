//! ⏰ reactions on the schedule embed.
//!
//! Reacting with ⏰ on a message the bot posted toggles the Boss Timer role; removing the
//! reaction takes the role away. The member is told what happened by DM.

use sea_orm::DatabaseConnection;
use serenity::all::{Context, CreateMessage, Reaction, ReactionType};

use crate::{
    error::AppError,
    service::subscription::{RoleAction, RoleChange, SubscriptionService},
};

/// Emoji that opts a member into boss reminders.
pub const REMINDER_EMOJI: &str = "⏰";

/// Handles the reaction_add event
pub async fn handle_reaction_add(db: &DatabaseConnection, ctx: Context, reaction: Reaction) {
    if let Err(e) = handle_reminder_reaction(db, &ctx, &reaction, RoleAction::Toggle).await {
        log_failure(&reaction, e);
    }
}

/// Handles the reaction_remove event
pub async fn handle_reaction_remove(db: &DatabaseConnection, ctx: Context, reaction: Reaction) {
    if let Err(e) = handle_reminder_reaction(db, &ctx, &reaction, RoleAction::Remove).await {
        log_failure(&reaction, e);
    }
}

async fn handle_reminder_reaction(
    db: &DatabaseConnection,
    ctx: &Context,
    reaction: &Reaction,
    action: RoleAction,
) -> Result<(), AppError> {
    if !is_reminder_emoji(&reaction.emoji) {
        return Ok(());
    }

    let (Some(guild_id), Some(user_id)) = (reaction.guild_id, reaction.user_id) else {
        return Ok(());
    };

    let bot_id = ctx.cache.current_user().id;
    if user_id == bot_id || reaction.member.as_ref().is_some_and(|m| m.user.bot) {
        return Ok(());
    }

    // Only the bot's own messages act as role toggles
    let message = reaction.message(ctx).await?;
    if message.author.id != bot_id {
        return Ok(());
    }

    let subscription = SubscriptionService::new(db, &ctx.http)
        .apply(guild_id.get(), user_id.get(), action)
        .await?;

    let notice = match subscription.change {
        RoleChange::Added => format!(
            "You have been given the role: {} for Boss Spawn Reminders.",
            subscription.role_name
        ),
        RoleChange::Removed => format!(
            "You have been removed from the role: {} for Boss Spawn Reminders.",
            subscription.role_name
        ),
        RoleChange::Unchanged => return Ok(()),
    };

    if let Err(e) = user_id
        .direct_message(ctx, CreateMessage::new().content(notice))
        .await
    {
        tracing::warn!(
            guild_id = guild_id.get(),
            user_id = user_id.get(),
            "Could not DM Boss Timer role change: {}",
            e
        );
    }

    Ok(())
}

fn is_reminder_emoji(emoji: &ReactionType) -> bool {
    matches!(emoji, ReactionType::Unicode(name) if name == REMINDER_EMOJI)
}

fn log_failure(reaction: &Reaction, err: AppError) {
    let guild_id = reaction.guild_id.map(|g| g.get());
    let user_id = reaction.user_id.map(|u| u.get());

    if err.is_user_error() {
        tracing::debug!(?guild_id, ?user_id, "Reminder reaction ignored: {}", err);
    } else {
        tracing::error!(?guild_id, ?user_id, "Failed to handle reminder reaction: {}", err);
    }
}
