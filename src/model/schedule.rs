//! Recurring boss spawn timetable.
//!
//! The daily boss event fires at a fixed list of local times every day. The archboss event
//! fires weekly on a set of weekdays at one local time. Both are evaluated in a single
//! configured civil time zone.

use chrono::{DateTime, NaiveTime, TimeDelta, Weekday};
use chrono_tz::Tz;

/// Default time zone all spawn times are expressed in.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Berlin;

/// Default lead time for daily boss reminders.
pub const DEFAULT_DAILY_WINDOW_SECS: i64 = 600;

/// Default lead time for archboss reminders.
pub const DEFAULT_WEEKLY_WINDOW_SECS: i64 = 900;

/// Recurring event type tracked by the reminder dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Daily field boss spawns.
    Boss,
    /// Weekly archboss spawn.
    Archboss,
}

/// One daily spawn slot.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySpawn {
    /// Local time of day the spawn happens.
    pub time: NaiveTime,
    /// What spawns, e.g. "2 Peace Boss, 1 Conflict Boss".
    pub label: String,
}

impl DailySpawn {
    /// Creates a spawn at `hour:00` local time.
    pub fn at_hour(hour: u32, label: impl Into<String>) -> Option<Self> {
        Some(Self {
            time: NaiveTime::from_hms_opt(hour, 0, 0)?,
            label: label.into(),
        })
    }
}

/// Weekly recurrence rule for the archboss.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyRule {
    /// Weekdays the archboss spawns on.
    pub weekdays: Vec<Weekday>,
    /// Local time of day the archboss spawns.
    pub time: NaiveTime,
}

/// Complete spawn configuration.
#[derive(Debug, Clone)]
pub struct EventSchedule {
    pub timezone: Tz,
    /// Daily spawns in priority order; earlier entries win ties on identical times.
    pub daily: Vec<DailySpawn>,
    pub weekly: WeeklyRule,
    /// Lead time before a daily spawn during which its reminder may fire.
    pub daily_window: TimeDelta,
    /// Lead time before an archboss spawn during which its reminder may fire.
    pub weekly_window: TimeDelta,
}

impl EventSchedule {
    /// Reminder window for the given event kind.
    pub fn window(&self, kind: EventKind) -> TimeDelta {
        match kind {
            EventKind::Boss => self.daily_window,
            EventKind::Archboss => self.weekly_window,
        }
    }

    /// Human readable name of the configured time zone for embed footers.
    pub fn timezone_name(&self) -> &'static str {
        self.timezone.name()
    }

    /// The game's current daily timetable.
    pub fn default_daily() -> Vec<DailySpawn> {
        [
            (12, "2 Peace Boss, 1 Conflict Boss"),
            (15, "2 Peace Boss, 1 Conflict Boss"),
            (19, "4 Peace Boss, 3 Conflict Boss"),
            (21, "3 Peace Boss, 2 Conflict Boss"),
            (0, "2 Peace Boss, 2 Conflict Boss"),
        ]
        .into_iter()
        .filter_map(|(hour, label)| DailySpawn::at_hour(hour, label))
        .collect()
    }

    /// Archboss spawns Wednesday and Saturday at 19:00.
    pub fn default_weekly() -> WeeklyRule {
        WeeklyRule {
            weekdays: vec![Weekday::Wed, Weekday::Sat],
            time: NaiveTime::from_hms_opt(19, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl Default for EventSchedule {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            daily: Self::default_daily(),
            weekly: Self::default_weekly(),
            daily_window: TimeDelta::seconds(DEFAULT_DAILY_WINDOW_SECS),
            weekly_window: TimeDelta::seconds(DEFAULT_WEEKLY_WINDOW_SECS),
        }
    }
}

/// A concrete upcoming spawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    pub at: DateTime<Tz>,
    pub label: String,
}
