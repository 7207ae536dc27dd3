use crate::{error::AppError, util::parse::parse_u64_from_string};

/// Text sent by DM to members joining a guild.
#[derive(Debug, Clone, PartialEq)]
pub struct WelcomeMessage {
    pub guild_id: u64,
    pub message: String,
}

impl WelcomeMessage {
    pub fn from_entity(entity: entity::welcome_message::Model) -> Result<Self, AppError> {
        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            message: entity.message,
        })
    }
}
