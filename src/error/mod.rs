//! Error types and user-facing error reporting.
//!
//! This module provides the application's error hierarchy. The `AppError` enum serves as
//! the top-level error type that wraps domain-specific errors. Command handlers convert
//! an `AppError` into a reply with [`AppError::user_message`]: user mistakes (missing
//! records, permissions, invalid input) are echoed verbatim, while storage, delivery, and
//! internal failures are logged in full and answered with a generic message.

pub mod config;
pub mod internal;

use serenity::http::HttpError;
use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    ///
    /// Fatal at startup.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    ///
    /// Reported to users generically, logged with detail.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size. Covers failed message delivery, which never aborts a
    /// reminder tick.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Internal inconsistency such as unparsable stored ids.
    #[error(transparent)]
    InternalError(#[from] InternalError),

    /// Message, role, channel, or record is absent.
    ///
    /// # Fields
    /// - Message describing what was not found, shown to the invoking user
    #[error("{0}")]
    NotFound(String),

    /// Bot or caller lacks the rights for the requested action.
    ///
    /// # Fields
    /// - Message shown to the invoking user
    #[error("{0}")]
    Permission(String),

    /// Invalid command input.
    ///
    /// # Fields
    /// - Message shown to the invoking user, listing valid options where applicable
    #[error("{0}")]
    Validation(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Maps a failed Discord lookup onto the user-facing taxonomy.
    ///
    /// HTTP 404 becomes `NotFound` with the provided message, HTTP 403 becomes
    /// `Permission`; everything else stays a delivery error.
    ///
    /// # Arguments
    /// - `err` - Error returned by Serenity
    /// - `not_found` - Message shown to the user when the resource does not exist
    pub fn from_discord_lookup(err: serenity::Error, not_found: &str) -> Self {
        match discord_status(&err) {
            Some(404) => AppError::NotFound(not_found.to_string()),
            Some(403) => AppError::Permission(
                "I don't have permission to do that. Please check my role permissions."
                    .to_string(),
            ),
            _ => AppError::from(err),
        }
    }

    /// Whether the error was caused by the invoking user rather than the bot.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Permission(_) | Self::Validation(_)
        )
    }

    /// Message to show the invoking user.
    ///
    /// User errors are returned verbatim. Storage, delivery, and internal errors return a
    /// generic message so implementation details never reach the channel.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::Permission(msg) | Self::Validation(msg) => msg.clone(),
            Self::DbErr(_) => {
                "An error occurred while accessing the database. Please try again later."
                    .to_string()
            }
            Self::DiscordErr(err) if discord_status(err) == Some(403) => {
                "I don't have permission to do that. Please check my role permissions."
                    .to_string()
            }
            _ => "Something went wrong while handling that command. Please try again later."
                .to_string(),
        }
    }
}

/// HTTP status code of an unsuccessful Discord REST request, if that is what failed.
fn discord_status(err: &serenity::Error) -> Option<u16> {
    match err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            Some(response.status_code.as_u16())
        }
        _ => None,
    }
}
