use serenity::all::{Context, Interaction};

use crate::bot::command;
use crate::state::BotState;

/// Handles the interaction_create event
///
/// Slash commands are dispatched by name; button presses are routed by custom id prefix.
pub async fn handle_interaction_create(state: &BotState, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Command(command) => command::dispatch(state, &ctx, &command).await,
        Interaction::Component(component) => {
            command::dispatch_component(state, &ctx, &component).await
        }
        _ => {}
    }
}
