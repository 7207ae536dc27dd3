use serenity::all::{
    Colour, CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateEmbedFooter, CreateInteractionResponseMessage,
};

use super::{integer_option, reply};
use crate::{
    error::AppError,
    service::blessing::{analyze, percent_bar, BlessingAnalysis},
    state::BotState,
};

pub fn create_commands() -> Vec<CreateCommand> {
    vec![CreateCommand::new("blessing")
        .description("Compare the cost of blue and purple blessings")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Integer,
                "blue_cost",
                "Price of one blue blessing in Lucent",
            )
            .min_int_value(0)
            .required(true),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Integer,
                "purple_cost",
                "Price of one purple blessing in Lucent",
            )
            .min_int_value(0)
            .required(true),
        )]
}

pub async fn blessing(
    _state: &BotState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let analysis = analyze(
        integer_option(command, "blue_cost")?,
        integer_option(command, "purple_cost")?,
    )?;

    reply(
        ctx,
        command,
        CreateInteractionResponseMessage::new().embed(blessing_embed(&analysis)),
    )
    .await
}

fn blessing_embed(analysis: &BlessingAnalysis) -> CreateEmbed {
    let cheaper = if analysis.blue_is_cheaper() {
        "It is more cost-effective to buy **Blue blessings**."
    } else {
        "It is more cost-effective to buy **Purple blessings**."
    };

    let mut embed = CreateEmbed::new()
        .title("🎲 Blessing Cost Analysis 🎲")
        .colour(Colour::PURPLE)
        .field("✅ Cost-effective Option", cheaper, false)
        .field(
            "💙 Total Cost for Blue Blessings",
            format!("{:.2} Lucent", analysis.blue_total),
            true,
        )
        .field(
            "💜 Total Cost for Purple Blessings",
            format!("{:.2} Lucent", analysis.purple_total),
            true,
        )
        .field(
            "🔮 Partial Blessing Gamble Options",
            "Below are options for partial blessings:",
            false,
        );

    for partial in &analysis.partials {
        embed = embed.field(
            format!("{}% Chance", partial.percent),
            format!(
                "{} `{:.2} Lucent` (💰 **Savings**: `{:.2} Lucent`)",
                percent_bar(partial.percent),
                partial.cost,
                partial.savings
            ),
            false,
        );
    }

    embed.footer(CreateEmbedFooter::new(
        "💡 Note: Gambling with partial blessings might save you Lucent but comes with a risk of failure.",
    ))
}
