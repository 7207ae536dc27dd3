use super::*;

/// Tests creating reminder settings for a guild without any.
///
/// Expected: Ok with ids round-tripped through their string columns
#[tokio::test]
async fn creates_new_settings() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GroupSettings)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    let repo = GroupSettingsRepository::new(db);
    let settings = GroupSettings {
        guild_id: 1,
        channel_id: 2,
        role_id: 3,
    };
    let stored = repo.upsert(&settings).await.unwrap();

    assert_eq!(stored, settings);

    Ok(())
}

/// Tests that re-running the admin command replaces channel and role.
///
/// Expected: Ok with a single row holding the newest values
#[tokio::test]
async fn replaces_existing_settings() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GroupSettings)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    factory::group_settings::GroupSettingsFactory::new(db)
        .guild_id("10")
        .channel_id("20")
        .role_id("30")
        .build()
        .await?;

    let repo = GroupSettingsRepository::new(db);
    repo.upsert(&GroupSettings {
        guild_id: 10,
        channel_id: 21,
        role_id: 31,
    })
    .await
    .unwrap();

    let count = entity::prelude::GroupSettings::find().count(db).await?;
    assert_eq!(count, 1);

    let stored = repo.find_by_guild_id(10).await.unwrap().unwrap();
    assert_eq!(stored.channel_id, 21);
    assert_eq!(stored.role_id, 31);

    Ok(())
}
