//! Boss Timer role membership.
//!
//! Members opt into reminder pings by holding the guild's configured notify role. The role
//! can be requested with `/subscribe` and `/unsubscribe` or by reacting with ⏰ on the
//! schedule embed.

use sea_orm::DatabaseConnection;
use serenity::{
    all::{GuildId, RoleId, UserId},
    http::Http,
};

use crate::{data::group_settings::GroupSettingsRepository, error::AppError};

const AUDIT_LOG_REASON: &str = "Boss Timer subscription";

/// What the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleAction {
    Add,
    Remove,
    /// Add when missing, remove when held.
    Toggle,
}

/// What actually happened to the member's roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChange {
    Added,
    Removed,
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct Subscription {
    pub role_name: String,
    pub change: RoleChange,
}

pub struct SubscriptionService<'a> {
    db: &'a DatabaseConnection,
    http: &'a Http,
}

impl<'a> SubscriptionService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: &'a Http) -> Self {
        Self { db, http }
    }

    /// Applies `action` to the guild's notify role for one member.
    ///
    /// # Returns
    /// - `Ok(Subscription)` - Role name and the change that was made, if any
    /// - `Err(AppError::NotFound)` - No notify role configured, or the role was deleted
    /// - `Err(AppError::Permission)` - The bot cannot manage the role
    /// - `Err(AppError::DiscordErr)` - Any other Discord failure
    pub async fn apply(
        &self,
        guild_id: u64,
        user_id: u64,
        action: RoleAction,
    ) -> Result<Subscription, AppError> {
        let settings = GroupSettingsRepository::new(self.db)
            .find_by_guild_id(guild_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Boss Timer role not set up in this server.".to_string())
            })?;

        if guild_id == 0 || user_id == 0 || settings.role_id == 0 {
            return Err(role_not_found());
        }

        let guild = GuildId::new(guild_id);
        let role_id = RoleId::new(settings.role_id);
        let user = UserId::new(user_id);

        let roles = guild.roles(self.http).await?;
        let role_name = roles
            .get(&role_id)
            .map(|role| role.name.clone())
            .ok_or_else(role_not_found)?;

        let member = guild
            .member(self.http, user)
            .await
            .map_err(|e| AppError::from_discord_lookup(e, "You are not a member of this server."))?;

        let change = plan(action, member.roles.contains(&role_id));
        match change {
            RoleChange::Added => self
                .http
                .add_member_role(guild, user, role_id, Some(AUDIT_LOG_REASON))
                .await
                .map_err(role_error)?,
            RoleChange::Removed => self
                .http
                .remove_member_role(guild, user, role_id, Some(AUDIT_LOG_REASON))
                .await
                .map_err(role_error)?,
            RoleChange::Unchanged => {}
        }

        if change != RoleChange::Unchanged {
            tracing::info!(guild_id, user_id, "Boss Timer role {:?}", change);
        }

        Ok(Subscription { role_name, change })
    }
}

/// Decides the role change for a member who currently does or does not hold the role.
pub fn plan(action: RoleAction, has_role: bool) -> RoleChange {
    match (action, has_role) {
        (RoleAction::Add | RoleAction::Toggle, false) => RoleChange::Added,
        (RoleAction::Remove | RoleAction::Toggle, true) => RoleChange::Removed,
        _ => RoleChange::Unchanged,
    }
}

fn role_not_found() -> AppError {
    AppError::NotFound("Role not found. Please contact an admin.".to_string())
}

fn role_error(err: serenity::Error) -> AppError {
    AppError::from_discord_lookup(err, "Role not found. Please contact an admin.")
}
