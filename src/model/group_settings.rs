use crate::{error::AppError, util::parse::parse_u64_from_string};

/// Boss reminder configuration for one guild.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSettings {
    pub guild_id: u64,
    /// Channel reminders and test reminders are posted to.
    pub channel_id: u64,
    /// Role mentioned by reminders and toggled by subscribe/unsubscribe.
    pub role_id: u64,
}

impl GroupSettings {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(GroupSettings)` - Successfully converted
    /// - `Err(AppError::InternalError)` - A stored id is not a valid u64
    pub fn from_entity(entity: entity::group_settings::Model) -> Result<Self, AppError> {
        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            channel_id: parse_u64_from_string(entity.channel_id)?,
            role_id: parse_u64_from_string(entity.role_id)?,
        })
    }
}
