use crate::{data::group_settings::GroupSettingsRepository, model::group_settings::GroupSettings};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, error::TestError, factory};

mod find_by_guild_id;
mod get_all;
mod upsert;
