//! Guild roster commands and the roster page buttons.

use serenity::all::{
    ButtonStyle, Colour, CommandInteraction, CommandOptionType, ComponentInteraction, Context,
    CreateActionRow, CreateButton, CreateCommand, CreateCommandOption, CreateEmbed,
    CreateInteractionResponse, CreateInteractionResponseMessage, GuildId, UserId,
};

use super::{ephemeral, integer_option, reply, require_guild, string_option};
use crate::{
    error::AppError,
    model::guild_member::{GuildClass, Weapon},
    service::roster::{render_roster_page, AddMemberInput, GuildStats, RosterPage, RosterService},
    state::BotState,
};

/// Custom id prefix of the roster page buttons; the target page index follows it.
pub const PAGE_BUTTON_PREFIX: &str = "guildmembers:";

pub fn create_commands() -> Vec<CreateCommand> {
    let weapon_option = |name: &str, description: &str| {
        Weapon::ALL.iter().fold(
            CreateCommandOption::new(CommandOptionType::String, name, description).required(true),
            |option, weapon| option.add_string_choice(weapon.as_str(), weapon.as_str()),
        )
    };

    let class_option = GuildClass::ALL.iter().fold(
        CreateCommandOption::new(CommandOptionType::String, "guild_class", "Your class")
            .required(true),
        |option, class| option.add_string_choice(class.as_str(), class.as_str()),
    );

    vec![
        CreateCommand::new("add_member")
            .description("Add or update your entry in the guild roster")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "ingame_name",
                    "Your in-game name",
                )
                .max_length(32)
                .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "gear_score",
                    "Your gear score",
                )
                .min_int_value(0)
                .required(true),
            )
            .add_option(class_option)
            .add_option(weapon_option("main_hand", "Your main hand weapon"))
            .add_option(weapon_option("offhand", "Your offhand weapon")),
        CreateCommand::new("guildmembers").description("List the guild roster by gear score"),
        CreateCommand::new("remove_member")
            .description("Remove a member from the guild roster")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "ingame_name",
                    "In-game name of the member to remove",
                )
                .required(true),
            ),
        CreateCommand::new("guild_stats").description("Show guild roster statistics"),
    ]
}

pub async fn add_member(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?.get();

    let input = AddMemberInput {
        user_id: command.user.id.get(),
        guild_id,
        ingame_name: string_option(command, "ingame_name")?,
        gear_score: integer_option(command, "gear_score")?,
        class: string_option(command, "guild_class")?,
        main_hand: string_option(command, "main_hand")?,
        offhand: string_option(command, "offhand")?,
    };

    RosterService::new(&state.db).add_member(input).await?;

    reply(
        ctx,
        command,
        ephemeral("Your guild member information has been added/updated successfully."),
    )
    .await
}

pub async fn guildmembers(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = require_guild(command)?.get();

    let page = RosterService::new(&state.db).page(guild_id, 0).await?;

    reply(ctx, command, roster_message(&page)).await
}

/// Answers a Previous/Next press by redrawing the roster message at the requested page.
pub async fn turn_page(
    state: &BotState,
    ctx: &Context,
    component: &ComponentInteraction,
    page: &str,
) -> Result<(), AppError> {
    let guild_id = component
        .guild_id
        .ok_or_else(|| AppError::Validation("Roster pages only work in a server.".to_string()))?
        .get();
    let page = page
        .parse::<u64>()
        .map_err(|_| AppError::Validation("Invalid roster page.".to_string()))?;

    let page = RosterService::new(&state.db).page(guild_id, page).await?;

    component
        .create_response(ctx, CreateInteractionResponse::UpdateMessage(roster_message(&page)))
        .await?;

    Ok(())
}

pub async fn remove_member(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild = require_guild(command)?;

    if command.user.id != guild_owner(ctx, guild).await? {
        return Err(AppError::Permission(
            "You do not have permission to use this command. Only the server owner can remove members."
                .to_string(),
        ));
    }

    let ingame_name = string_option(command, "ingame_name")?;
    RosterService::new(&state.db)
        .remove_member(guild.get(), &ingame_name)
        .await?;

    tracing::info!(guild_id = guild.get(), "Removed roster entry {}", ingame_name.trim());

    reply(
        ctx,
        command,
        ephemeral(format!(
            "Member with in-game name '{}' has been successfully removed.",
            ingame_name.trim()
        )),
    )
    .await
}

pub async fn guild_stats(
    state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild = require_guild(command)?;

    let stats = RosterService::new(&state.db).stats(guild.get()).await?;
    let guild_name = guild_name(ctx, guild).await?;

    let embed = CreateEmbed::new()
        .title(format!("Guild Statistics for {}", guild_name))
        .colour(Colour::BLUE)
        .field(
            "💡 Average Gear Score",
            stats.average_gear_score.to_string(),
            false,
        )
        .field(
            "🎖 Class Distribution",
            format!(
                "💖 Healers: {}\n🔥 DPS: {}\n🛡 Tanks: {}",
                stats.healers, stats.dps, stats.tanks
            ),
            false,
        )
        .field("🗠 Weapon Combinations", weapon_combos_text(&stats), false);

    reply(ctx, command, CreateInteractionResponseMessage::new().embed(embed)).await
}

fn roster_message(page: &RosterPage) -> CreateInteractionResponseMessage {
    CreateInteractionResponseMessage::new()
        .content(render_roster_page(page))
        .components(vec![page_buttons(page)])
}

/// Previous/Next buttons; their custom ids carry the page they lead to.
fn page_buttons(page: &RosterPage) -> CreateActionRow {
    let previous = CreateButton::new(format!(
        "{}{}",
        PAGE_BUTTON_PREFIX,
        page.page.saturating_sub(1)
    ))
    .label("Previous")
    .style(ButtonStyle::Primary)
    .disabled(!page.has_previous());

    let next = CreateButton::new(format!("{}{}", PAGE_BUTTON_PREFIX, page.page + 1))
        .label("Next")
        .style(ButtonStyle::Primary)
        .disabled(!page.has_next());

    CreateActionRow::Buttons(vec![previous, next])
}

fn weapon_combos_text(stats: &GuildStats) -> String {
    if stats.weapon_combos.is_empty() {
        return "None".to_string();
    }

    stats
        .weapon_combos
        .iter()
        .map(|((a, b), count)| format!("🏹 {} & {}: {}", a, b, count))
        .collect::<Vec<_>>()
        .join("\n")
}

async fn guild_owner(ctx: &Context, guild: GuildId) -> Result<UserId, AppError> {
    let cached = ctx.cache.guild(guild).map(|g| g.owner_id);
    if let Some(owner_id) = cached {
        return Ok(owner_id);
    }

    Ok(guild.to_partial_guild(ctx).await?.owner_id)
}

async fn guild_name(ctx: &Context, guild: GuildId) -> Result<String, AppError> {
    let cached = ctx.cache.guild(guild).map(|g| g.name.clone());
    if let Some(name) = cached {
        return Ok(name);
    }

    Ok(guild.to_partial_guild(ctx).await?.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: u64, total_pages: u64) -> RosterPage {
        RosterPage {
            members: Vec::new(),
            page,
            total_pages,
        }
    }

    fn custom_ids(row: CreateActionRow) -> Vec<(String, bool)> {
        let value = serde_json::to_value(row).unwrap();
        value["components"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| {
                (
                    b["custom_id"].as_str().unwrap().to_string(),
                    b["disabled"].as_bool().unwrap_or(false),
                )
            })
            .collect()
    }

    #[test]
    fn first_page_disables_previous() {
        assert_eq!(
            custom_ids(page_buttons(&page(0, 3))),
            vec![
                ("guildmembers:0".to_string(), true),
                ("guildmembers:1".to_string(), false)
            ]
        );
    }

    #[test]
    fn last_page_disables_next() {
        assert_eq!(
            custom_ids(page_buttons(&page(2, 3))),
            vec![
                ("guildmembers:1".to_string(), false),
                ("guildmembers:3".to_string(), true)
            ]
        );
    }

    #[test]
    fn lists_weapon_combinations() {
        let stats = GuildStats {
            average_gear_score: 3000,
            healers: 0,
            dps: 2,
            tanks: 0,
            weapon_combos: vec![(("Dagger", "Greatsword"), 2)],
        };
        assert_eq!(weapon_combos_text(&stats), "🏹 Dagger & Greatsword: 2");
    }
}
