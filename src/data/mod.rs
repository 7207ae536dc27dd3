//! Database repository layer.
//!
//! Each repository wraps a borrowed `DatabaseConnection` and performs the queries for one
//! table. Entity models never leave this layer: rows are converted to domain models from
//! `crate::model` on the way out, and snowflake ids are stored as strings on the way in.

pub mod cycle_state;
pub mod group_settings;
pub mod guild_member;
pub mod poll;
pub mod welcome_message;

#[cfg(test)]
mod test;
