//! Weekly guild boss vote.

use serenity::all::{
    Colour, CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateInteractionResponseFollowup, CreateInteractionResponseMessage,
};

use super::{
    add_poll_reactions, bot_user_id, fetch_reaction_snapshot, reply, require_guild,
    string_option,
};
use crate::{
    error::AppError,
    model::poll::{CreatePollParam, PollKind},
    service::{
        poll::{PollService, WEEKLY_BOSSES},
        tally::{render_options, render_vote_results},
    },
    state::BotState,
    util::parse::parse_message_id,
};

pub fn create_commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("post_weekly_bosses")
            .description("Post the weekly guild boss vote"),
        CreateCommand::new("results_weekly_bosses")
            .description("Show the results of a weekly guild boss vote")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "message_id",
                    "ID or link of the vote message",
                )
                .required(true),
            ),
    ]
}

pub async fn post_weekly_bosses(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?.get();
    let bosses: Vec<String> = WEEKLY_BOSSES.iter().map(|b| b.to_string()).collect();

    let embed = CreateEmbed::new()
        .title("Weekly Guild Boss Voting")
        .description(format!(
            "React with the emoji corresponding to the boss you want to vote for. You can vote for multiple bosses.\n\n{}",
            render_options(&bosses, "\n", false)
        ))
        .colour(Colour::GOLD);

    reply(ctx, command, CreateInteractionResponseMessage::new().embed(embed)).await?;
    let message = command.get_response(&ctx.http).await?;

    PollService::new(&state.db)
        .record(CreatePollParam {
            message_id: message.id.get(),
            channel_id: message.channel_id.get(),
            guild_id,
            kind: PollKind::BossVote,
            options: bosses.clone(),
        })
        .await?;

    add_poll_reactions(ctx, &message, bosses.len()).await?;

    tracing::info!(guild_id, message_id = message.id.get(), "Posted weekly boss vote");

    Ok(())
}

pub async fn results_weekly_bosses(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?.get();
    let message_id = parse_message_id(&string_option(command, "message_id")?)?;

    command.defer(ctx).await?;

    let service = PollService::new(&state.db);
    let poll = service.find(message_id, PollKind::BossVote).await?;
    if poll.guild_id != guild_id {
        return Err(AppError::NotFound(
            "This message ID has no associated reactions recorded.".to_string(),
        ));
    }

    let snapshot = fetch_reaction_snapshot(ctx, poll.channel_id, poll.message_id).await?;
    let tallies = service.tally(&poll, &snapshot, bot_user_id(ctx).get());

    let embed = CreateEmbed::new()
        .title("Weekly Boss Voting Results")
        .description(render_vote_results(&tallies))
        .colour(Colour::GOLD);

    command
        .create_followup(ctx, CreateInteractionResponseFollowup::new().embed(embed))
        .await?;

    Ok(())
}
