use super::*;

/// Expected: no active row before the first save
#[tokio::test]
async fn empty_table_has_no_active_cycle() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::CycleState)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    let repo = CycleStateRepository::new(db);
    assert!(repo.get_active().await.unwrap().is_none());

    Ok(())
}

/// Tests that saving twice updates the single active row in place.
///
/// Expected: one row holding the latest state and occurrence marker
#[tokio::test]
async fn updates_active_row_in_place() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::CycleState)
        .build()
        .await?;
    let db = test.db.as_ref().unwrap();

    let first = Utc.with_ymd_and_hms(2026, 1, 7, 18, 0, 0).unwrap();
    let second = Utc.with_ymd_and_hms(2026, 1, 10, 18, 0, 0).unwrap();

    let repo = CycleStateRepository::new(db);
    repo.save(SaveCycleParam {
        state: CycleState::Peace,
        occurrence: first,
    })
    .await
    .unwrap();
    repo.save(SaveCycleParam {
        state: CycleState::Conflict,
        occurrence: second,
    })
    .await
    .unwrap();

    let count = entity::prelude::CycleState::find().count(db).await?;
    assert_eq!(count, 1);

    let active = repo.get_active().await.unwrap().unwrap();
    assert_eq!(active.state, CycleState::Conflict);
    assert_eq!(active.occurrence, Some(second));

    Ok(())
}
