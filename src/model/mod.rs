//! Domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and are what
//! services and command handlers work with. Schedule models are pure configuration and are
//! never persisted.

pub mod cycle;
pub mod group_settings;
pub mod guild_member;
pub mod poll;
pub mod schedule;
pub mod welcome_message;
