//! Discord gateway integration.
//!
//! The bot answers slash commands and button presses, greets new members, and hands out the
//! Boss Timer role when members react to the schedule embed. Its HTTP client is shared
//! with the reminder scheduler so reminders are sent without a second connection.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Receive guild and role data for the cache
//! - `GUILD_MEMBERS` - Receive member join events for welcome messages (privileged intent)
//! - `GUILD_MESSAGE_REACTIONS` - Receive ⏰ reactions on the schedule embed
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod command;
pub mod handler;
pub mod start;
