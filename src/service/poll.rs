use sea_orm::DatabaseConnection;

use crate::{
    data::poll::PollRepository,
    error::AppError,
    model::poll::{CreatePollParam, OptionTally, PollKind, PollRecord, ReactionSnapshot},
    service::tally::{tally, REACTION_EMOJIS},
};

/// Bosses offered in the weekly guild boss vote, in slot order.
pub const WEEKLY_BOSSES: [&str; 14] = [
    "Morokai",
    "Excavator-9",
    "Chernobog",
    "Talus",
    "Malakar",
    "Cornelius",
    "Ahzreil",
    "Minezerok",
    "Kowazan",
    "Adentus",
    "Junobote",
    "Grand Aelon",
    "Nirma",
    "Aridus",
];

pub struct PollService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PollService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a posted poll.
    ///
    /// # Returns
    /// - `Ok(PollRecord)` - The stored record
    /// - `Err(AppError::Validation)` - No options, or more options than reaction slots
    /// - `Err(AppError::DbErr)` - Database error during insert
    pub async fn record(&self, param: CreatePollParam) -> Result<PollRecord, AppError> {
        if param.options.is_empty() || param.options.len() > REACTION_EMOJIS.len() {
            return Err(AppError::Validation(format!(
                "A poll needs between 1 and {} options.",
                REACTION_EMOJIS.len()
            )));
        }

        PollRepository::new(self.db).create(param).await
    }

    /// Looks up the poll posted as `message_id`.
    ///
    /// # Returns
    /// - `Ok(PollRecord)` - The poll, if it is of the expected kind
    /// - `Err(AppError::NotFound)` - The message is not a recorded poll of that kind
    pub async fn find(&self, message_id: u64, kind: PollKind) -> Result<PollRecord, AppError> {
        PollRepository::new(self.db)
            .find_by_message_id(message_id)
            .await?
            .filter(|poll| poll.kind == kind)
            .ok_or_else(|| {
                AppError::NotFound(
                    "This message ID has no associated reactions recorded.".to_string(),
                )
            })
    }

    /// Tallies a snapshot of the poll message's reactions.
    pub fn tally(
        &self,
        poll: &PollRecord,
        snapshot: &[ReactionSnapshot],
        bot_id: u64,
    ) -> Vec<OptionTally> {
        tally(poll, snapshot, Some(bot_id))
    }
}
