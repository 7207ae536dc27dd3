use super::*;

/// Tests roster ordering by gear score with name as tiebreaker.
///
/// Expected: highest gear first, equal gear ordered by name, other guilds excluded
#[tokio::test]
async fn orders_by_gear_score_descending() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildMember)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    for (name, gear) in [("Bravo", 3000), ("Alpha", 3000), ("Charlie", 3400), ("Delta", 2500)] {
        factory::guild_member::GuildMemberFactory::new(db)
            .guild_id("7")
            .ingame_name(name)
            .gear_score(gear)
            .build()
            .await?;
    }
    factory::create_guild_member(db, "8").await?;

    let repo = GuildMemberRepository::new(db);
    let (members, total) = repo.get_page_by_guild(7, 0, 10).await.unwrap();

    assert_eq!(total, 4);
    let names: Vec<_> = members.iter().map(|m| m.ingame_name.as_str()).collect();
    assert_eq!(names, vec!["Charlie", "Alpha", "Bravo", "Delta"]);

    Ok(())
}

/// Expected: 12 members split into a page of 10 and a page of 2
#[tokio::test]
async fn paginates_roster() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::GuildMember)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    for gear in 0..12 {
        factory::guild_member::GuildMemberFactory::new(db)
            .guild_id("7")
            .gear_score(1000 + gear)
            .build()
            .await?;
    }

    let repo = GuildMemberRepository::new(db);
    let (first, total) = repo.get_page_by_guild(7, 0, 10).await.unwrap();
    let (second, _) = repo.get_page_by_guild(7, 1, 10).await.unwrap();

    assert_eq!(total, 12);
    assert_eq!(first.len(), 10);
    assert_eq!(second.len(), 2);
    assert_eq!(first[0].gear_score, 1011);
    assert_eq!(second[1].gear_score, 1000);

    Ok(())
}
