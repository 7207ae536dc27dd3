use sea_orm::DatabaseConnection;

use crate::{
    data::welcome_message::WelcomeMessageRepository, error::AppError,
    model::welcome_message::WelcomeMessage,
};

/// Longest message Discord accepts in a single DM.
const MAX_MESSAGE_LEN: usize = 2000;

pub struct WelcomeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WelcomeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sets the message new members of a guild receive by DM.
    ///
    /// # Returns
    /// - `Ok(WelcomeMessage)` - The stored message
    /// - `Err(AppError::Validation)` - Message is empty or longer than a DM allows
    /// - `Err(AppError::DbErr)` - Database error during upsert
    pub async fn set(&self, guild_id: u64, message: &str) -> Result<WelcomeMessage, AppError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::Validation(
                "The welcome message cannot be empty.".to_string(),
            ));
        }
        if message.chars().count() > MAX_MESSAGE_LEN {
            return Err(AppError::Validation(format!(
                "The welcome message cannot be longer than {} characters.",
                MAX_MESSAGE_LEN
            )));
        }

        WelcomeMessageRepository::new(self.db)
            .upsert(guild_id, message.to_string())
            .await
    }

    pub async fn get(&self, guild_id: u64) -> Result<Option<WelcomeMessage>, AppError> {
        WelcomeMessageRepository::new(self.db)
            .find_by_guild_id(guild_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, error::TestError};

    #[tokio::test]
    async fn validates_message_length() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::WelcomeMessage)
            .build()
            .await?;
        let db = test.db.as_ref().unwrap();

        let service = WelcomeService::new(db);
        assert!(matches!(
            service.set(1, "   ").await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.set(1, &"x".repeat(2001)).await,
            Err(AppError::Validation(_))
        ));

        let stored = service.set(1, "  Hello adventurer!  ").await.unwrap();
        assert_eq!(stored.message, "Hello adventurer!");

        Ok(())
    }
}
