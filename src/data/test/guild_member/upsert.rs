use super::*;

#[tokio::test]
async fn creates_roster_entry() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildMember)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    let repo = GuildMemberRepository::new(db);
    let member = repo.upsert(param(1, 100, "Shieldwall", 3100)).await.unwrap();

    assert_eq!(member.ingame_name, "Shieldwall");
    assert_eq!(member.class, GuildClass::Tank);
    assert_eq!(member.main_hand, Weapon::SwordAndShield);

    let stored = entity::prelude::GuildMember::find_by_id(("1".to_string(), "100".to_string()))
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.class, "Tank");
    assert_eq!(stored.offhand, "Greatsword");

    Ok(())
}

/// Tests that adding the same member twice keeps only the second submission.
///
/// Expected: Ok with one row whose every column holds the newest values
#[tokio::test]
async fn second_submission_replaces_first() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildMember)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    let repo = GuildMemberRepository::new(db);
    repo.upsert(param(1, 100, "OldName", 2800)).await.unwrap();
    repo.upsert(UpsertGuildMemberParam {
        class: GuildClass::Healer,
        main_hand: Weapon::WandAndTome,
        offhand: Weapon::Staff,
        ..param(1, 100, "NewName", 3300)
    })
    .await
    .unwrap();

    let count = entity::prelude::GuildMember::find().count(db).await?;
    assert_eq!(count, 1);

    let (members, _) = repo.get_page_by_guild(100, 0, 10).await.unwrap();
    assert_eq!(members[0].ingame_name, "NewName");
    assert_eq!(members[0].gear_score, 3300);
    assert_eq!(members[0].class, GuildClass::Healer);
    assert_eq!(members[0].main_hand, Weapon::WandAndTome);
    assert_eq!(members[0].offhand, Weapon::Staff);

    Ok(())
}

/// Expected: the same user in two guilds has two independent entries
#[tokio::test]
async fn same_user_in_two_guilds() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildMember)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    let repo = GuildMemberRepository::new(db);
    repo.upsert(param(1, 100, "Alt", 2000)).await.unwrap();
    repo.upsert(param(1, 200, "Main", 3000)).await.unwrap();

    let count = entity::prelude::GuildMember::find().count(db).await?;
    assert_eq!(count, 2);

    Ok(())
}
