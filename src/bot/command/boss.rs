//! Boss schedule, reminder channel setup, and the Boss Timer role.

use chrono::Utc;
use serenity::all::{
    ChannelType, Colour, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, CreateEmbed, CreateEmbedFooter, CreateInteractionResponseMessage,
    Permissions, ReactionType,
};

use super::{
    channel_option, ephemeral, reply, require_admin, require_guild, role_option,
};
use crate::{
    bot::handler::reaction::REMINDER_EMOJI,
    error::AppError,
    model::{group_settings::GroupSettings, schedule::Occurrence},
    service::{
        boss_settings::BossSettingsService,
        cycle::CycleService,
        reminder::{test_reminder_message, Announcer},
        schedule::{overview, ScheduleOverview},
        subscription::{RoleAction, RoleChange, SubscriptionService},
    },
    state::BotState,
};

const THUMBNAIL_URL: &str = "https://haruki.s-ul.eu/fjEy0RW7";

pub fn create_commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("set_boss_channel")
            .description("Set the channel and role for boss spawn reminders")
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "channel",
                    "Channel that receives boss reminders",
                )
                .channel_types(vec![ChannelType::Text, ChannelType::News])
                .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Role,
                    "role",
                    "Role pinged by boss reminders",
                )
                .required(true),
            ),
        CreateCommand::new("boss_schedule").description("Show the next boss and archboss spawns"),
        CreateCommand::new("subscribe").description("Get pinged for boss spawns"),
        CreateCommand::new("unsubscribe").description("Stop getting pinged for boss spawns"),
        CreateCommand::new("boss_test")
            .description("Send a test reminder to the boss reminder channel")
            .default_member_permissions(Permissions::ADMINISTRATOR),
    ]
}

pub async fn set_boss_channel(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    require_admin(command)?;
    let guild_id = require_guild(command)?.get();
    let channel = channel_option(command, "channel")?;
    let role = role_option(command, "role")?;

    BossSettingsService::new(&state.db)
        .configure(guild_id, channel.get(), role.get())
        .await?;

    reply(
        ctx,
        command,
        ephemeral(format!(
            "Boss reminder channel set to <#{}> and role set to <@&{}>.",
            channel.get(),
            role.get()
        )),
    )
    .await
}

pub async fn boss_schedule(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?.get();
    let schedule = state.schedule.as_ref();
    let now = Utc::now().with_timezone(&schedule.timezone);

    let cycle = CycleService::new(&state.db, &schedule.weekly)
        .sync(now)
        .await?;
    let overview = overview(schedule, now, cycle).ok_or_else(|| {
        AppError::NotFound("No upcoming boss spawns are scheduled.".to_string())
    })?;
    let settings = BossSettingsService::new(&state.db).get(guild_id).await?;

    let embed = schedule_embed(&overview, settings.as_ref(), schedule.timezone_name());
    reply(ctx, command, CreateInteractionResponseMessage::new().embed(embed)).await?;

    // Seed the ⏰ reaction so members can find it, then clear the bot's own
    let message = command.get_response(&ctx.http).await?;
    let alarm = ReactionType::Unicode(REMINDER_EMOJI.to_string());
    message.react(ctx, alarm.clone()).await?;
    message.delete_reaction(&ctx.http, None, alarm).await?;

    Ok(())
}

pub async fn subscribe(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?.get();

    let subscription = SubscriptionService::new(&state.db, &ctx.http)
        .apply(guild_id, command.user.id.get(), RoleAction::Add)
        .await?;

    let content = match subscription.change {
        RoleChange::Added => "You have been subscribed to Boss Timer.",
        _ => "You are already subscribed to Boss Timer.",
    };

    reply(ctx, command, ephemeral(content)).await
}

pub async fn unsubscribe(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?.get();

    let subscription = SubscriptionService::new(&state.db, &ctx.http)
        .apply(guild_id, command.user.id.get(), RoleAction::Remove)
        .await?;

    let content = match subscription.change {
        RoleChange::Removed => "You have been unsubscribed from Boss Timer.",
        _ => "You are not subscribed to Boss Timer.",
    };

    reply(ctx, command, ephemeral(content)).await
}

pub async fn boss_test(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    require_admin(command)?;
    let guild_id = require_guild(command)?.get();

    let settings = BossSettingsService::new(&state.db)
        .require(guild_id)
        .await?;

    ctx.http
        .announce(settings.channel_id, test_reminder_message(settings.role_id))
        .await?;

    tracing::info!(guild_id, "Sent test reminder");

    reply(
        ctx,
        command,
        ephemeral(format!("Test reminder sent to <#{}>.", settings.channel_id)),
    )
    .await
}

fn schedule_embed(
    overview: &ScheduleOverview,
    settings: Option<&GroupSettings>,
    timezone_name: &str,
) -> CreateEmbed {
    let role = settings
        .map(|s| format!("<@&{}>", s.role_id))
        .unwrap_or_else(|| "No role set".to_string());

    CreateEmbed::new()
        .title("🕒 Upcoming Boss Spawn Schedule")
        .colour(Colour::DARK_GREEN)
        .field("Next Boss", occurrence_field(&overview.next_boss), false)
        .field(
            archboss_heading(overview),
            occurrence_field(&overview.next_archboss),
            false,
        )
        .field(
            "Boss Spawn Reminder Role",
            format!(
                "{}\nReact with the emoji below to gain access to the reminder feature!",
                role
            ),
            false,
        )
        .thumbnail(THUMBNAIL_URL)
        .footer(CreateEmbedFooter::new(format!(
            "All times are in {} time.",
            timezone_name
        )))
}

fn archboss_heading(overview: &ScheduleOverview) -> String {
    if overview.archboss_first() {
        format!(
            "⚔️ Next Archboss (This is a high-priority event!) {}",
            overview.cycle.emoji()
        )
    } else {
        format!("Next Archboss (Important!) {}", overview.cycle.emoji())
    }
}

fn occurrence_field(occurrence: &Occurrence) -> String {
    let timestamp = occurrence.at.timestamp();
    format!(
        "**Time**: <t:{}:F> (<t:{}:R>)\n**Boss**: {}",
        timestamp, timestamp, occurrence.label
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::cycle::CycleState;
    use chrono::TimeZone;
    use chrono_tz::Europe::Berlin;

    fn overview(boss_hour: u32, archboss_hour: u32) -> ScheduleOverview {
        ScheduleOverview {
            next_boss: Occurrence {
                at: Berlin.with_ymd_and_hms(2026, 3, 4, boss_hour, 0, 0).unwrap(),
                label: "Daily".to_string(),
            },
            next_archboss: Occurrence {
                at: Berlin.with_ymd_and_hms(2026, 3, 4, archboss_hour, 0, 0).unwrap(),
                label: CycleState::Conflict.archboss_label(),
            },
            cycle: CycleState::Conflict,
        }
    }

    #[test]
    fn archboss_before_next_boss_is_high_priority() {
        let heading = archboss_heading(&overview(21, 19));
        assert!(heading.starts_with("⚔️ Next Archboss (This is a high-priority event!)"));
        assert!(heading.ends_with("🔴"));
    }

    #[test]
    fn later_archboss_is_marked_important() {
        assert_eq!(
            archboss_heading(&overview(15, 19)),
            "Next Archboss (Important!) 🔴"
        );
    }

    #[test]
    fn occurrence_uses_discord_timestamps() {
        let o = overview(15, 19);
        let ts = o.next_boss.at.timestamp();
        assert_eq!(
            occurrence_field(&o.next_boss),
            format!("**Time**: <t:{ts}:F> (<t:{ts}:R>)\n**Boss**: Daily")
        );
    }
}
