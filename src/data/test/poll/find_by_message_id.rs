use super::*;

#[tokio::test]
async fn finds_factory_record() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PollRecord)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    let record = factory::create_poll_record(db, &["Sword", "Bow"]).await?;

    let repo = PollRepository::new(db);
    let found = repo
        .find_by_message_id(record.message_id.parse().unwrap())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.kind, PollKind::Drops);
    assert_eq!(found.options, vec!["Sword".to_string(), "Bow".to_string()]);

    Ok(())
}

/// Expected: Ok(None) for a message that was never recorded
#[tokio::test]
async fn returns_none_for_unknown_message() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PollRecord)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    let repo = PollRepository::new(db);
    assert!(repo.find_by_message_id(1).await.unwrap().is_none());

    Ok(())
}
