use chrono::{NaiveTime, TimeDelta, Weekday};
use chrono_tz::Tz;

use crate::{
    error::{config::ConfigError, AppError},
    model::schedule::{
        DailySpawn, EventSchedule, WeeklyRule, DEFAULT_DAILY_WINDOW_SECS,
        DEFAULT_WEEKLY_WINDOW_SECS,
    },
};

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    pub schedule: EventSchedule,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            schedule: schedule_from_env()?,
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn invalid(name: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Builds the spawn timetable from the environment, falling back to the game's defaults
/// for any variable that is unset.
fn schedule_from_env() -> Result<EventSchedule, ConfigError> {
    let defaults = EventSchedule::default();

    let timezone = match optional("BOSS_TIMEZONE") {
        Some(value) => parse_timezone("BOSS_TIMEZONE", &value)?,
        None => defaults.timezone,
    };
    let daily = match optional("BOSS_DAILY_SPAWNS") {
        Some(value) => parse_daily_spawns("BOSS_DAILY_SPAWNS", &value)?,
        None => defaults.daily,
    };
    let weekdays = match optional("ARCHBOSS_WEEKDAYS") {
        Some(value) => parse_weekdays("ARCHBOSS_WEEKDAYS", &value)?,
        None => defaults.weekly.weekdays,
    };
    let weekly_time = match optional("ARCHBOSS_TIME") {
        Some(value) => parse_time("ARCHBOSS_TIME", &value)?,
        None => defaults.weekly.time,
    };
    let daily_window = window_from_env("BOSS_REMINDER_WINDOW_SECS", DEFAULT_DAILY_WINDOW_SECS)?;
    let weekly_window =
        window_from_env("ARCHBOSS_REMINDER_WINDOW_SECS", DEFAULT_WEEKLY_WINDOW_SECS)?;

    Ok(EventSchedule {
        timezone,
        daily,
        weekly: WeeklyRule {
            weekdays,
            time: weekly_time,
        },
        daily_window,
        weekly_window,
    })
}

fn window_from_env(name: &str, default: i64) -> Result<TimeDelta, ConfigError> {
    let secs = match optional(name) {
        Some(value) => value
            .trim()
            .parse::<i64>()
            .map_err(|e| invalid(name, e.to_string()))?,
        None => default,
    };
    if secs < 0 {
        return Err(invalid(name, "window must not be negative"));
    }
    Ok(TimeDelta::seconds(secs))
}

fn parse_timezone(name: &str, value: &str) -> Result<Tz, ConfigError> {
    value
        .trim()
        .parse::<Tz>()
        .map_err(|_| invalid(name, format!("unknown time zone '{}'", value.trim())))
}

fn parse_time(name: &str, value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| invalid(name, format!("expected HH:MM, got '{}'", value.trim())))
}

/// Parses `HH:MM=label;HH:MM=label`. Entry order is kept since it decides ties.
fn parse_daily_spawns(name: &str, value: &str) -> Result<Vec<DailySpawn>, ConfigError> {
    let mut spawns = Vec::new();
    for entry in value.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let (time, label) = entry
            .split_once('=')
            .ok_or_else(|| invalid(name, format!("entry '{}' is missing '='", entry)))?;
        let label = label.trim();
        if label.is_empty() {
            return Err(invalid(name, format!("entry '{}' has an empty label", entry)));
        }
        spawns.push(DailySpawn {
            time: parse_time(name, time)?,
            label: label.to_string(),
        });
    }
    if spawns.is_empty() {
        return Err(invalid(name, "at least one spawn is required"));
    }
    Ok(spawns)
}

fn parse_weekdays(name: &str, value: &str) -> Result<Vec<Weekday>, ConfigError> {
    let mut weekdays = Vec::new();
    for day in value.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        let weekday = day
            .parse::<Weekday>()
            .map_err(|_| invalid(name, format!("unknown weekday '{}'", day)))?;
        if !weekdays.contains(&weekday) {
            weekdays.push(weekday);
        }
    }
    if weekdays.is_empty() {
        return Err(invalid(name, "at least one weekday is required"));
    }
    Ok(weekdays)
}
