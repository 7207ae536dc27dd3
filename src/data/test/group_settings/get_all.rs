use super::*;

/// Tests that a row with a corrupted id does not hide the other guilds.
///
/// Expected: Ok with only the readable rows
#[tokio::test]
async fn skips_unreadable_rows() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GroupSettings)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    factory::create_group_settings(db).await?;
    factory::create_group_settings(db).await?;
    factory::group_settings::GroupSettingsFactory::new(db)
        .channel_id("not-a-snowflake")
        .build()
        .await?;

    let repo = GroupSettingsRepository::new(db);
    let all = repo.get_all().await.unwrap();

    assert_eq!(all.len(), 2);

    Ok(())
}
