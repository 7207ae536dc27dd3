//! Weekly guild boss drops: members react to the items they need.

use serenity::all::{
    Colour, CommandInteraction, CommandOptionType, Context, CreateAllowedMentions,
    CreateCommand, CreateCommandOption, CreateEmbed, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage,
};

use super::{
    add_poll_reactions, bot_user_id, fetch_reaction_snapshot, fit_message, reply,
    require_guild, string_option,
};
use crate::{
    error::AppError,
    model::poll::{CreatePollParam, PollKind},
    service::{
        poll::PollService,
        tally::{render_options, render_voters},
    },
    state::BotState,
    util::parse::parse_message_id,
};

/// Items offered per drops post.
const DROP_ITEMS: usize = 7;

pub fn create_commands() -> Vec<CreateCommand> {
    let mut post_drops = CreateCommand::new("post_drops")
        .description("Post this week's guild boss drops for members to react to");
    for i in 1..=DROP_ITEMS {
        post_drops = post_drops.add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                format!("item{}", i),
                format!("Drop item {}", i),
            )
            .max_length(100)
            .required(true),
        );
    }

    let get_votes = CreateCommand::new("get_votes")
        .description("List who reacted to each item of a drops post")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "message_id",
                "ID or link of the drops message",
            )
            .required(true),
        );

    vec![post_drops, get_votes]
}

pub async fn post_drops(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?.get();

    let items = (1..=DROP_ITEMS)
        .map(|i| string_option(command, &format!("item{}", i)))
        .collect::<Result<Vec<_>, _>>()?;

    let embed = CreateEmbed::new()
        .title("Weekly Guild Boss Drops")
        .description("React to the items you need!")
        .colour(Colour::BLUE)
        .field("Items", render_options(&items, "\n\n", true), false);

    reply(ctx, command, CreateInteractionResponseMessage::new().embed(embed)).await?;
    let message = command.get_response(&ctx.http).await?;

    PollService::new(&state.db)
        .record(CreatePollParam {
            message_id: message.id.get(),
            channel_id: message.channel_id.get(),
            guild_id,
            kind: PollKind::Drops,
            options: items.clone(),
        })
        .await?;

    add_poll_reactions(ctx, &message, items.len()).await?;

    tracing::info!(guild_id, message_id = message.id.get(), "Posted drops poll");

    Ok(())
}

pub async fn get_votes(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?.get();
    let message_id = parse_message_id(&string_option(command, "message_id")?)?;

    // Listing reactors can take several requests
    command.defer(ctx).await?;

    let service = PollService::new(&state.db);
    let poll = service.find(message_id, PollKind::Drops).await?;
    if poll.guild_id != guild_id {
        return Err(AppError::NotFound(
            "This message ID has no associated reactions recorded.".to_string(),
        ));
    }

    let snapshot = fetch_reaction_snapshot(ctx, poll.channel_id, poll.message_id).await?;
    let tallies = service.tally(&poll, &snapshot, bot_user_id(ctx).get());

    command
        .create_followup(
            ctx,
            CreateInteractionResponseFollowup::new()
                .content(fit_message(render_voters(&tallies)))
                .allowed_mentions(CreateAllowedMentions::new()),
        )
        .await?;

    Ok(())
}
