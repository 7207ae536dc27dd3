//! Slash commands and button components.
//!
//! Each submodule declares its commands with `create_commands()` and exposes one handler
//! per command. Handlers return `Result<(), AppError>`; [`dispatch`] turns an error into an
//! ephemeral reply using [`AppError::user_message`] and logs anything that was not the
//! user's fault.

pub mod blessing;
pub mod boss;
pub mod drops;
pub mod ping;
pub mod roster;
pub mod weekly_boss;
pub mod welcome;

use serenity::all::{
    ChannelId, CommandDataOptionValue, CommandInteraction, ComponentInteraction, Context,
    CreateAllowedMentions, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, GuildId, Message,
    MessageId, ReactionType, RoleId, UserId,
};

use crate::{
    error::AppError,
    model::poll::ReactionSnapshot,
    service::tally::{slot_of, REACTION_EMOJIS},
    state::BotState,
};

/// Discord's message content limit, in characters.
const MESSAGE_LIMIT: usize = 2000;

/// Reaction users are listed in pages of this size.
const REACTION_PAGE_SIZE: u8 = 100;

/// Creates all slash command definitions
pub fn create_commands() -> Vec<CreateCommand> {
    let mut commands = Vec::new();

    commands.extend(drops::create_commands());
    commands.extend(weekly_boss::create_commands());
    commands.extend(boss::create_commands());
    commands.extend(welcome::create_commands());
    commands.extend(roster::create_commands());
    commands.extend(blessing::create_commands());
    commands.extend(ping::create_commands());

    commands
}

/// Routes a slash command to its handler and reports failures to the caller.
pub async fn dispatch(state: &BotState, ctx: &Context, command: &CommandInteraction) {
    let result = match command.data.name.as_str() {
        "post_drops" => drops::post_drops(state, ctx, command).await,
        "get_votes" => drops::get_votes(state, ctx, command).await,
        "post_weekly_bosses" => weekly_boss::post_weekly_bosses(state, ctx, command).await,
        "results_weekly_bosses" => weekly_boss::results_weekly_bosses(state, ctx, command).await,
        "set_boss_channel" => boss::set_boss_channel(state, ctx, command).await,
        "boss_schedule" => boss::boss_schedule(state, ctx, command).await,
        "subscribe" => boss::subscribe(state, ctx, command).await,
        "unsubscribe" => boss::unsubscribe(state, ctx, command).await,
        "boss_test" => boss::boss_test(state, ctx, command).await,
        "set_welcome_message" => welcome::set_welcome_message(state, ctx, command).await,
        "preview_welcome_message" => welcome::preview_welcome_message(state, ctx, command).await,
        "add_member" => roster::add_member(state, ctx, command).await,
        "guildmembers" => roster::guildmembers(state, ctx, command).await,
        "remove_member" => roster::remove_member(state, ctx, command).await,
        "guild_stats" => roster::guild_stats(state, ctx, command).await,
        "blessing" => blessing::blessing(state, ctx, command).await,
        "ping" => ping::ping(state, ctx, command).await,
        other => {
            tracing::warn!("Received unknown command {}", other);
            Ok(())
        }
    };

    let Err(err) = result else {
        return;
    };

    log_error(command.guild_id, &command.data.name, &err);

    let content = err.user_message();
    let response = CreateInteractionResponse::Message(ephemeral(content.clone()));

    // Deferred or already answered interactions only accept follow-ups
    if command.create_response(ctx, response).await.is_err() {
        let followup = CreateInteractionResponseFollowup::new()
            .content(content)
            .ephemeral(true);
        if let Err(e) = command.create_followup(ctx, followup).await {
            tracing::error!("Failed to report command error to user: {}", e);
        }
    }
}

/// Routes a button press by its custom id.
pub async fn dispatch_component(state: &BotState, ctx: &Context, component: &ComponentInteraction) {
    let custom_id = component.data.custom_id.as_str();

    let result = match custom_id.strip_prefix(roster::PAGE_BUTTON_PREFIX) {
        Some(page) => roster::turn_page(state, ctx, component, page).await,
        None => {
            tracing::debug!("Ignoring component with custom id {}", custom_id);
            Ok(())
        }
    };

    let Err(err) = result else {
        return;
    };

    log_error(component.guild_id, custom_id, &err);

    let response = CreateInteractionResponse::Message(ephemeral(err.user_message()));
    if let Err(e) = component.create_response(ctx, response).await {
        tracing::error!("Failed to report component error to user: {}", e);
    }
}

fn log_error(guild_id: Option<GuildId>, command: &str, err: &AppError) {
    let guild_id = guild_id.map(|g| g.get());

    if err.is_user_error() {
        tracing::debug!(?guild_id, command, "Command rejected: {}", err);
    } else {
        tracing::error!(?guild_id, command, "Command failed: {}", err);
    }
}

/// Ephemeral reply that pings nobody.
pub fn ephemeral(content: impl Into<String>) -> CreateInteractionResponseMessage {
    CreateInteractionResponseMessage::new()
        .content(content)
        .ephemeral(true)
        .allowed_mentions(CreateAllowedMentions::new())
}

pub async fn reply(
    ctx: &Context,
    command: &CommandInteraction,
    message: CreateInteractionResponseMessage,
) -> Result<(), AppError> {
    command
        .create_response(ctx, CreateInteractionResponse::Message(message))
        .await?;

    Ok(())
}

/// Guild the command was used in.
pub fn require_guild(command: &CommandInteraction) -> Result<GuildId, AppError> {
    command.guild_id.ok_or_else(|| {
        AppError::Validation("This command can only be used in a server.".to_string())
    })
}

/// Rejects callers without the Administrator permission.
pub fn require_admin(command: &CommandInteraction) -> Result<(), AppError> {
    let is_admin = command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|permissions| permissions.administrator());

    if !is_admin {
        return Err(AppError::Permission(
            "You need the Administrator permission to use this command.".to_string(),
        ));
    }

    Ok(())
}

fn option<'a>(command: &'a CommandInteraction, name: &str) -> Option<&'a CommandDataOptionValue> {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .map(|option| &option.value)
}

fn missing_option(name: &str) -> AppError {
    AppError::Validation(format!("Missing required option '{}'.", name))
}

pub fn string_option(command: &CommandInteraction, name: &str) -> Result<String, AppError> {
    option(command, name)
        .and_then(|value| value.as_str())
        .map(str::to_string)
        .ok_or_else(|| missing_option(name))
}

pub fn integer_option(command: &CommandInteraction, name: &str) -> Result<i64, AppError> {
    option(command, name)
        .and_then(|value| value.as_i64())
        .ok_or_else(|| missing_option(name))
}

pub fn channel_option(command: &CommandInteraction, name: &str) -> Result<ChannelId, AppError> {
    option(command, name)
        .and_then(|value| value.as_channel_id())
        .ok_or_else(|| missing_option(name))
}

pub fn role_option(command: &CommandInteraction, name: &str) -> Result<RoleId, AppError> {
    option(command, name)
        .and_then(|value| value.as_role_id())
        .ok_or_else(|| missing_option(name))
}

/// Id of the bot's own user.
pub fn bot_user_id(ctx: &Context) -> UserId {
    ctx.cache.current_user().id
}

/// Adds the first `count` slot emojis to a freshly posted poll, in slot order.
pub async fn add_poll_reactions(
    ctx: &Context,
    message: &Message,
    count: usize,
) -> Result<(), AppError> {
    for emoji in REACTION_EMOJIS.iter().take(count) {
        message
            .react(ctx, ReactionType::Unicode(emoji.to_string()))
            .await?;
    }

    Ok(())
}

/// Reads every slot reaction on a poll message together with the users behind it.
///
/// # Returns
/// - `Ok(Vec<ReactionSnapshot>)` - One snapshot per slot emoji present on the message
/// - `Err(AppError::NotFound)` - The message no longer exists
/// - `Err(AppError::DiscordErr)` - Fetching the message or its reactions failed
pub async fn fetch_reaction_snapshot(
    ctx: &Context,
    channel_id: u64,
    message_id: u64,
) -> Result<Vec<ReactionSnapshot>, AppError> {
    let not_found = "Message not found. Please make sure the ID is correct.";
    if channel_id == 0 || message_id == 0 {
        return Err(AppError::NotFound(not_found.to_string()));
    }

    let channel = ChannelId::new(channel_id);
    let message = channel
        .message(ctx, MessageId::new(message_id))
        .await
        .map_err(|e| AppError::from_discord_lookup(e, not_found))?;

    let mut snapshot = Vec::new();
    for reaction in &message.reactions {
        let ReactionType::Unicode(emoji) = &reaction.reaction_type else {
            continue;
        };
        if slot_of(emoji).is_none() {
            continue;
        }

        let mut user_ids = Vec::new();
        let mut after: Option<UserId> = None;
        loop {
            let users = channel
                .reaction_users(
                    &ctx.http,
                    message.id,
                    reaction.reaction_type.clone(),
                    Some(REACTION_PAGE_SIZE),
                    after,
                )
                .await?;

            let page_len = users.len();
            after = users.last().map(|user| user.id);
            user_ids.extend(users.iter().map(|user| user.id.get()));

            if page_len < usize::from(REACTION_PAGE_SIZE) {
                break;
            }
        }

        snapshot.push(ReactionSnapshot {
            emoji: emoji.clone(),
            user_ids,
        });
    }

    Ok(snapshot)
}

/// Shortens text to fit one Discord message.
pub fn fit_message(text: String) -> String {
    if text.chars().count() <= MESSAGE_LIMIT {
        return text;
    }

    let mut shortened: String = text.chars().take(MESSAGE_LIMIT - 1).collect();
    shortened.push('…');
    shortened
}
