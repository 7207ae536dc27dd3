use crate::{
    data::guild_member::GuildMemberRepository,
    model::guild_member::{GuildClass, UpsertGuildMemberParam, Weapon},
};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, error::TestError, factory};

mod delete_by_name;
mod get_page_by_guild;
mod upsert;

fn param(user_id: u64, guild_id: u64, name: &str, gear_score: i32) -> UpsertGuildMemberParam {
    UpsertGuildMemberParam {
        user_id,
        guild_id,
        ingame_name: name.to_string(),
        gear_score,
        class: GuildClass::Tank,
        main_hand: Weapon::SwordAndShield,
        offhand: Weapon::Greatsword,
    }
}
