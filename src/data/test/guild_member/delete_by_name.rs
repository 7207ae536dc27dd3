use super::*;

#[tokio::test]
async fn deletes_matching_member() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildMember)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    factory::guild_member::GuildMemberFactory::new(db)
        .guild_id("7")
        .ingame_name("Leaver")
        .build()
        .await?;
    factory::create_guild_member(db, "7").await?;

    let repo = GuildMemberRepository::new(db);
    let deleted = repo.delete_by_name(7, "Leaver").await.unwrap();

    assert_eq!(deleted, 1);
    let count = entity::prelude::GuildMember::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that a name in another guild is not touched.
///
/// Expected: Ok(0)
#[tokio::test]
async fn ignores_other_guilds() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildMember)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    factory::guild_member::GuildMemberFactory::new(db)
        .guild_id("8")
        .ingame_name("Leaver")
        .build()
        .await?;

    let repo = GuildMemberRepository::new(db);
    assert_eq!(repo.delete_by_name(7, "Leaver").await.unwrap(), 0);

    Ok(())
}
