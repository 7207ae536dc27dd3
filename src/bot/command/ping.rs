use serenity::all::{CommandInteraction, Context, CreateCommand};
use std::time::{Duration, Instant};

use super::{ephemeral, reply};
use crate::{error::AppError, state::BotState};

pub fn create_commands() -> Vec<CreateCommand> {
    vec![CreateCommand::new("ping").description("Check the bot's latency and uptime")]
}

pub async fn ping(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let started = Instant::now();
    ctx.http.get_current_user().await?;
    let api_latency = started.elapsed();

    let content = format!(
        "🏓 Pong!\n**API latency**: {} ms\n**Uptime**: {}\n**Servers**: {}\n**Version**: {}",
        api_latency.as_millis(),
        format_uptime(state.started_at.elapsed()),
        ctx.cache.guild_count(),
        env!("CARGO_PKG_VERSION")
    );

    reply(ctx, command, ephemeral(content)).await
}

fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let (days, hours, minutes) = (secs / 86_400, secs / 3600 % 24, secs / 60 % 60);

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else {
        format!("{}h {}m {}s", hours, minutes, secs % 60)
    }
}
