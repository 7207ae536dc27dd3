mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use std::sync::Arc;

use crate::{config::Config, error::AppError, state::BotState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let schedule = Arc::new(config.schedule.clone());

    tracing::info!(
        timezone = schedule.timezone_name(),
        daily_spawns = schedule.daily.len(),
        "Starting bot"
    );

    // Initialize Discord bot and extract HTTP client
    let state = BotState::new(db.clone(), schedule.clone());
    let (bot_client, discord_http) = bot::start::init_bot(&config, state).await?;

    // Start boss reminder scheduler
    scheduler::boss_reminders::start_scheduler(db, discord_http, schedule).await?;

    // Run the gateway until shutdown
    bot::start::start_bot(bot_client).await
}
