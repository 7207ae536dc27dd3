//! Next-occurrence calculation for the daily boss and weekly archboss.
//!
//! All functions are pure: the caller supplies `now` already converted to the schedule's
//! time zone. Configured times are localized per calendar day, so DST shifts move the UTC
//! instant but never the wall-clock time. A local time inside a DST gap does not exist that
//! day and is skipped; an ambiguous local time resolves to its earlier instant.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::model::{
    cycle::CycleState,
    schedule::{DailySpawn, EventKind, EventSchedule, Occurrence, WeeklyRule},
};

/// Next daily boss spawn strictly after `now`.
///
/// Takes the earliest configured time still ahead today, otherwise the earliest one
/// tomorrow. A `00:00` entry therefore always resolves to the coming midnight. When two
/// entries share a time the first listed wins.
///
/// Returns `None` only when `spawns` is empty.
pub fn next_daily_event(now: DateTime<Tz>, spawns: &[DailySpawn]) -> Option<Occurrence> {
    let tz = now.timezone();
    let today = now.date_naive();

    // Day two covers a tomorrow whose only spawn fell into a DST gap.
    for offset in 0..=2 {
        let date = today.checked_add_days(Days::new(offset))?;

        let mut best: Option<(DateTime<Tz>, &DailySpawn)> = None;
        for spawn in spawns {
            let Some(at) = localize(&tz, date, spawn.time) else {
                continue;
            };
            if at <= now {
                continue;
            }
            if best.map_or(true, |(best_at, _)| at < best_at) {
                best = Some((at, spawn));
            }
        }

        if let Some((at, spawn)) = best {
            return Some(Occurrence {
                at,
                label: spawn.label.clone(),
            });
        }
    }

    None
}

/// Next archboss spawn strictly after `now`, labelled with the cycle state it will have.
pub fn next_weekly_event(
    now: DateTime<Tz>,
    rule: &WeeklyRule,
    cycle: CycleState,
) -> Option<Occurrence> {
    next_weekly_at(now, rule).map(|at| Occurrence {
        at,
        label: cycle.archboss_label(),
    })
}

/// Instant of the next weekly occurrence strictly after `now`.
///
/// Looks at most one week ahead, which always reaches a configured weekday unless the rule
/// has none.
pub fn next_weekly_at(now: DateTime<Tz>, rule: &WeeklyRule) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let today = now.date_naive();

    (0..=7)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .filter(|date| rule.weekdays.contains(&date.weekday()))
        .filter_map(|date| localize(&tz, date, rule.time))
        .find(|at| *at > now)
}

/// Number of weekly occurrences in the half-open range `(after, up_to]`.
pub fn weekly_occurrences_between(
    after: DateTime<Tz>,
    up_to: DateTime<Tz>,
    rule: &WeeklyRule,
) -> u64 {
    let mut count = 0;
    let mut cursor = after;

    while let Some(next) = next_weekly_at(cursor, rule) {
        if next > up_to {
            break;
        }
        count += 1;
        cursor = next;
    }

    count
}

/// Next occurrence of either event kind.
///
/// Archboss occurrences need the cycle state for their label; without one no archboss
/// occurrence is produced.
pub fn next_occurrence(
    schedule: &EventSchedule,
    kind: EventKind,
    now: DateTime<Tz>,
    cycle: Option<CycleState>,
) -> Option<Occurrence> {
    match kind {
        EventKind::Boss => next_daily_event(now, &schedule.daily),
        EventKind::Archboss => cycle.and_then(|c| next_weekly_event(now, &schedule.weekly, c)),
    }
}

/// What `/boss_schedule` shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleOverview {
    pub next_boss: Occurrence,
    pub next_archboss: Occurrence,
    pub cycle: CycleState,
}

impl ScheduleOverview {
    /// Whether the archboss comes before the next regular boss, which makes it the
    /// high-priority entry.
    pub fn archboss_first(&self) -> bool {
        self.next_archboss.at < self.next_boss.at
    }
}

pub fn overview(
    schedule: &EventSchedule,
    now: DateTime<Tz>,
    cycle: CycleState,
) -> Option<ScheduleOverview> {
    Some(ScheduleOverview {
        next_boss: next_daily_event(now, &schedule.daily)?,
        next_archboss: next_weekly_event(now, &schedule.weekly, cycle)?,
        cycle,
    })
}

fn localize(tz: &Tz, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&date.and_time(time)).earliest()
}
