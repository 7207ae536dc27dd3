//! Poll records and reaction snapshots.

use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

use crate::{
    error::{internal::InternalError, AppError},
    util::parse::parse_u64_from_string,
};

/// What a posted poll message is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollKind {
    /// Loot drop message; reactors are asking for an item.
    Drops,
    /// Weekly vote on which bosses to fight.
    BossVote,
}

impl PollKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drops => "drops",
            Self::BossVote => "boss_vote",
        }
    }
}

impl fmt::Display for PollKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PollKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drops" => Ok(Self::Drops),
            "boss_vote" => Ok(Self::BossVote),
            other => Err(other.to_string()),
        }
    }
}

/// A posted message whose reactions are read back as votes.
#[derive(Debug, Clone, PartialEq)]
pub struct PollRecord {
    pub message_id: u64,
    pub channel_id: u64,
    pub guild_id: u64,
    pub kind: PollKind,
    /// Option labels; index `i` belongs to reaction slot `i`.
    pub options: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl PollRecord {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// The option list is stored as a JSON array of strings.
    ///
    /// # Returns
    /// - `Ok(PollRecord)` - Successfully converted
    /// - `Err(AppError::InternalError)` - Stored id, kind, or option list is malformed
    pub fn from_entity(entity: entity::poll_record::Model) -> Result<Self, AppError> {
        let options: Vec<String> =
            serde_json::from_str(&entity.options).map_err(|e| InternalError::PollOptions {
                message_id: entity.message_id.clone(),
                source: e,
            })?;
        let kind = entity
            .kind
            .parse::<PollKind>()
            .map_err(|value| InternalError::UnknownStoredValue {
                column: "poll_record.kind",
                value,
            })?;

        Ok(Self {
            message_id: parse_u64_from_string(entity.message_id)?,
            channel_id: parse_u64_from_string(entity.channel_id)?,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            kind,
            options,
            created_at: entity.created_at,
        })
    }
}

/// Parameters for persisting a freshly posted poll.
#[derive(Debug, Clone)]
pub struct CreatePollParam {
    pub message_id: u64,
    pub channel_id: u64,
    pub guild_id: u64,
    pub kind: PollKind,
    pub options: Vec<String>,
}

/// Users that reacted with one emoji, in the order the platform returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionSnapshot {
    pub emoji: String,
    pub user_ids: Vec<u64>,
}

/// Voters for one poll option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionTally {
    pub label: String,
    pub voters: Vec<u64>,
}
