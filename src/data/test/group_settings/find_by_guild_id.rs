use super::*;

#[tokio::test]
async fn finds_settings_for_guild() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GroupSettings)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    let created = factory::create_group_settings(db).await?;

    let repo = GroupSettingsRepository::new(db);
    let found = repo
        .find_by_guild_id(created.guild_id.parse().unwrap())
        .await
        .unwrap();

    assert!(found.is_some());
    assert_eq!(found.unwrap().role_id.to_string(), created.role_id);

    Ok(())
}

/// Expected: Ok(None) for a guild that never configured reminders
#[tokio::test]
async fn returns_none_for_unconfigured_guild() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GroupSettings)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    let repo = GroupSettingsRepository::new(db);
    assert!(repo.find_by_guild_id(999).await.unwrap().is_none());

    Ok(())
}
