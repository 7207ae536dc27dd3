//! Keeps the archboss Conflict/Peace cycle aligned with real weekly occurrences.
//!
//! The stored row carries the occurrence its state labels. Once that occurrence has passed
//! the state advances one step per passed occurrence, so a restart or downtime never skips or
//! double-counts a flip.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use sea_orm::DatabaseConnection;

use crate::{
    data::cycle_state::CycleStateRepository,
    error::AppError,
    model::{
        cycle::{CycleRecord, CycleState, SaveCycleParam},
        schedule::WeeklyRule,
    },
    service::schedule::{next_weekly_at, weekly_occurrences_between},
};

pub struct CycleService<'a> {
    db: &'a DatabaseConnection,
    rule: &'a WeeklyRule,
}

impl<'a> CycleService<'a> {
    pub fn new(db: &'a DatabaseConnection, rule: &'a WeeklyRule) -> Self {
        Self { db, rule }
    }

    /// Returns the cycle state of the next archboss occurrence after `now`.
    ///
    /// Creates the row on first use, starting at `Peace`, and persists any catch-up
    /// advancement.
    ///
    /// # Returns
    /// - `Ok(CycleState)` - State labelling the next weekly occurrence
    /// - `Err(AppError::DbErr)` - Failed to read or save the cycle row
    pub async fn sync(&self, now: DateTime<Tz>) -> Result<CycleState, AppError> {
        let repo = CycleStateRepository::new(self.db);
        let record = repo.get_active().await?;

        let Some(next) = next_weekly_at(now, self.rule) else {
            return Ok(record.map(|r| r.state).unwrap_or_default());
        };
        let next_utc = next.with_timezone(&Utc);

        let state = match &record {
            Some(record) => catch_up(record, now, next_utc, self.rule),
            None => CycleState::default(),
        };

        let up_to_date = record
            .as_ref()
            .is_some_and(|r| r.occurrence == Some(next_utc) && r.state == state);
        if up_to_date {
            return Ok(state);
        }

        if let Some(previous) = record.as_ref().map(|r| r.state).filter(|s| *s != state) {
            tracing::info!(
                "Archboss cycle advanced from {} to {} for occurrence {}",
                previous,
                state,
                next_utc
            );
        }

        repo.save(SaveCycleParam {
            state,
            occurrence: next_utc,
        })
        .await?;

        Ok(state)
    }
}

/// State the stored record implies for the occurrence at `next`.
///
/// A marker before `next` has already happened, as has every occurrence between it and
/// `now`; each of those flips the state once. A marker at or after `next` is current.
fn catch_up(
    record: &CycleRecord,
    now: DateTime<Tz>,
    next: DateTime<Utc>,
    rule: &WeeklyRule,
) -> CycleState {
    match record.occurrence {
        Some(marker) if marker < next => {
            let marker = marker.with_timezone(&now.timezone());
            let passed = 1 + weekly_occurrences_between(marker, now, rule);
            record.state.advance_by(passed)
        }
        _ => record.state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::schedule::EventSchedule;
    use chrono::TimeZone;
    use chrono_tz::Europe::Berlin;
    use test_utils::{builder::TestBuilder, error::TestError};

    fn berlin(d: u32, h: u32, m: u32) -> DateTime<Tz> {
        Berlin.with_ymd_and_hms(2026, 1, d, h, m, 0).unwrap()
    }

    fn record(state: CycleState, occurrence: Option<DateTime<Tz>>) -> CycleRecord {
        CycleRecord {
            id: 1,
            state,
            occurrence: occurrence.map(|o| o.with_timezone(&Utc)),
        }
    }

    fn next(now: DateTime<Tz>, rule: &WeeklyRule) -> DateTime<Utc> {
        next_weekly_at(now, rule).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn current_marker_keeps_state() {
        let rule = EventSchedule::default_weekly();
        let now = berlin(7, 12, 0);
        let rec = record(CycleState::Peace, Some(berlin(7, 19, 0)));

        assert_eq!(catch_up(&rec, now, next(now, &rule), &rule), CycleState::Peace);
    }

    #[test]
    fn one_passed_occurrence_flips_once() {
        let rule = EventSchedule::default_weekly();
        let now = berlin(7, 19, 1);
        let rec = record(CycleState::Peace, Some(berlin(7, 19, 0)));

        assert_eq!(
            catch_up(&rec, now, next(now, &rule), &rule),
            CycleState::Conflict
        );
    }

    #[test]
    fn downtime_over_three_occurrences_flips_three_times() {
        let rule = EventSchedule::default_weekly();
        // Marker Wed 7th; Sat 10th and Wed 14th also passed by Thursday 15th.
        let now = berlin(15, 9, 0);
        let rec = record(CycleState::Peace, Some(berlin(7, 19, 0)));

        assert_eq!(
            catch_up(&rec, now, next(now, &rule), &rule),
            CycleState::Conflict
        );
    }

    #[test]
    fn downtime_over_two_occurrences_returns_to_start() {
        let rule = EventSchedule::default_weekly();
        let now = berlin(12, 9, 0);
        let rec = record(CycleState::Conflict, Some(berlin(7, 19, 0)));

        assert_eq!(
            catch_up(&rec, now, next(now, &rule), &rule),
            CycleState::Conflict
        );
    }

    #[tokio::test]
    async fn first_sync_starts_at_peace() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::CycleState)
            .build()
            .await?;
        let db = test.db.as_ref().unwrap();
        let rule = EventSchedule::default_weekly();

        let service = CycleService::new(db, &rule);
        assert_eq!(service.sync(berlin(6, 12, 0)).await.unwrap(), CycleState::Peace);

        let stored = CycleStateRepository::new(db).get_active().await.unwrap().unwrap();
        assert_eq!(stored.occurrence, Some(berlin(7, 19, 0).with_timezone(&Utc)));

        Ok(())
    }

    /// Tests that minute-by-minute syncing flips exactly once per occurrence.
    #[tokio::test]
    async fn advances_once_per_occurrence() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::CycleState)
            .build()
            .await?;
        let db = test.db.as_ref().unwrap();
        let rule = EventSchedule::default_weekly();
        let service = CycleService::new(db, &rule);

        let mut states = Vec::new();
        let mut now = berlin(7, 18, 55);
        while now <= berlin(7, 19, 5) {
            states.push(service.sync(now).await.unwrap());
            now += chrono::TimeDelta::minutes(1);
        }

        let flips = states.windows(2).filter(|w| w[0] != w[1]).count();
        assert_eq!(flips, 1);
        assert_eq!(states.first(), Some(&CycleState::Peace));
        assert_eq!(states.last(), Some(&CycleState::Conflict));

        Ok(())
    }

    #[tokio::test]
    async fn catches_up_after_downtime() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::CycleState)
            .build()
            .await?;
        let db = test.db.as_ref().unwrap();
        let rule = EventSchedule::default_weekly();
        let service = CycleService::new(db, &rule);

        service.sync(berlin(7, 12, 0)).await.unwrap();
        // Offline across Wed 7th, Sat 10th and Wed 14th.
        let state = service.sync(berlin(15, 12, 0)).await.unwrap();

        assert_eq!(state, CycleState::Conflict);
        let stored = CycleStateRepository::new(db).get_active().await.unwrap().unwrap();
        assert_eq!(stored.occurrence, Some(berlin(17, 19, 0).with_timezone(&Utc)));

        Ok(())
    }
}
