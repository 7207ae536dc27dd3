//! Shared bot state.
//!
//! Built once at startup and cloned into the gateway event handler. Every field is cheap to
//! clone: the database connection is a pool and the schedule sits behind an `Arc`.

use sea_orm::DatabaseConnection;
use std::{sync::Arc, time::Instant};

use crate::model::schedule::EventSchedule;

#[derive(Clone)]
pub struct BotState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// Spawn timetable used by schedule queries and reminders.
    pub schedule: Arc<EventSchedule>,

    /// Process start, reported by the ping command.
    pub started_at: Instant,
}

impl BotState {
    pub fn new(db: DatabaseConnection, schedule: Arc<EventSchedule>) -> Self {
        Self {
            db,
            schedule,
            started_at: Instant::now(),
        }
    }
}
