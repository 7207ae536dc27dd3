use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateMessage, Permissions,
};

use super::{ephemeral, reply, require_admin, require_guild, string_option};
use crate::{error::AppError, service::welcome::WelcomeService, state::BotState};

pub fn create_commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("set_welcome_message")
            .description("Set the message sent to new members")
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message",
                    "Welcome message text",
                )
                .required(true),
            ),
        CreateCommand::new("preview_welcome_message")
            .description("Receive this server's welcome message by DM"),
    ]
}

pub async fn set_welcome_message(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    require_admin(command)?;
    let guild_id = require_guild(command)?.get();
    let message = string_option(command, "message")?;

    WelcomeService::new(&state.db).set(guild_id, &message).await?;

    reply(
        ctx,
        command,
        ephemeral("Welcome message set successfully for this server."),
    )
    .await
}

pub async fn preview_welcome_message(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?.get();

    let welcome = WelcomeService::new(&state.db)
        .get(guild_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("No welcome message set for this server.".to_string())
        })?;

    if let Err(e) = command
        .user
        .direct_message(ctx, CreateMessage::new().content(welcome.message))
        .await
    {
        tracing::warn!(
            guild_id,
            user_id = command.user.id.get(),
            "Could not DM welcome preview: {}",
            e
        );
        return Err(AppError::Permission(
            "Unable to send you a DM. Please check your privacy settings.".to_string(),
        ));
    }

    reply(
        ctx,
        command,
        ephemeral("The welcome message has been sent to your DMs."),
    )
    .await
}
