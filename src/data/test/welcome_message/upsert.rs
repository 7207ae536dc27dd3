use super::*;

#[tokio::test]
async fn stores_and_replaces_message() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::WelcomeMessage)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    let repo = WelcomeMessageRepository::new(db);
    repo.upsert(5, "Welcome!".to_string()).await.unwrap();
    repo.upsert(5, "Welcome to the guild!".to_string())
        .await
        .unwrap();

    let stored = repo.find_by_guild_id(5).await.unwrap().unwrap();
    assert_eq!(stored.message, "Welcome to the guild!");

    Ok(())
}

/// Expected: each guild keeps its own message
#[tokio::test]
async fn keeps_guilds_separate() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::WelcomeMessage)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    let repo = WelcomeMessageRepository::new(db);
    repo.upsert(1, "one".to_string()).await.unwrap();
    repo.upsert(2, "two".to_string()).await.unwrap();

    assert_eq!(repo.find_by_guild_id(1).await.unwrap().unwrap().message, "one");
    assert!(repo.find_by_guild_id(3).await.unwrap().is_none());

    Ok(())
}
