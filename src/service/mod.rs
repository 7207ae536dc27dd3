//! Business logic layer.
//!
//! Services sit between the bot's command handlers and the repositories. Database-backed
//! services borrow a `DatabaseConnection` the same way repositories do. The schedule
//! calculator, vote tally, and blessing calculator are pure and never touch storage or the
//! network.

pub mod blessing;
pub mod boss_settings;
pub mod cycle;
pub mod poll;
pub mod reminder;
pub mod roster;
pub mod schedule;
pub mod subscription;
pub mod tally;
pub mod welcome;
