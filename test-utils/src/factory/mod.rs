//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let settings = factory::create_group_settings(&db).await?;
//!     let member = factory::guild_member::GuildMemberFactory::new(&db)
//!         .guild_id(&settings.guild_id)
//!         .gear_score(3200)
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `group_settings` - Boss reminder channel/role configuration
//! - `guild_member` - Roster entries
//! - `poll_record` - Posted poll/drop messages
//! - `helpers` - Unique id generation

pub mod group_settings;
pub mod guild_member;
pub mod helpers;
pub mod poll_record;

pub use group_settings::create_group_settings;
pub use guild_member::create_guild_member;
pub use poll_record::create_poll_record;
