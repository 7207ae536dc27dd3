use super::*;

/// Tests that option labels keep their slot order through the JSON column.
///
/// Expected: Ok with options read back in the order they were posted
#[tokio::test]
async fn preserves_option_order() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PollRecord)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    let options: Vec<String> = ["Zeta", "Alpha", "Mid", "Beta"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let repo = PollRepository::new(db);
    repo.create(CreatePollParam {
        message_id: 55,
        channel_id: 66,
        guild_id: 77,
        kind: PollKind::BossVote,
        options: options.clone(),
    })
    .await
    .unwrap();

    let stored = repo.find_by_message_id(55).await.unwrap().unwrap();
    assert_eq!(stored.options, options);
    assert_eq!(stored.kind, PollKind::BossVote);
    assert_eq!(stored.channel_id, 66);

    Ok(())
}
