//! Ready event handler for bot initialization.
//!
//! Fired when the bot connects to Discord's gateway and completes the initial handshake.
//! The handler logs the connection, sets the bot's activity, and registers the global
//! slash commands so every guild sees the current command set.

use serenity::all::{ActivityData, Command, Context, Ready};

use crate::bot::command;

/// Handles the ready event when the bot connects to Discord.
///
/// Command registration failure is logged and the bot keeps running; previously
/// registered commands stay available.
///
/// # Arguments
/// - `ctx` - Discord context for setting activity status and registering commands
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord in {} guilds",
        ready.user.name,
        ready.guilds.len()
    );

    ctx.set_activity(Some(ActivityData::watching("the boss timers")));

    match Command::set_global_commands(&ctx.http, command::create_commands()).await {
        Ok(commands) => tracing::info!("Registered {} slash commands", commands.len()),
        Err(e) => tracing::error!("Failed to register slash commands: {}", e),
    }
}
