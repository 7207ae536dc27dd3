//! Guild roster: gear submissions, the paginated member list, and guild statistics.

use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;

use crate::{
    data::guild_member::GuildMemberRepository,
    error::AppError,
    model::guild_member::{GuildClass, GuildMember, UpsertGuildMemberParam, Weapon},
};

/// Members shown per roster page.
pub const MEMBERS_PER_PAGE: u64 = 10;

/// Raw `/add_member` input, validated by [`RosterService::add_member`].
#[derive(Debug, Clone)]
pub struct AddMemberInput {
    pub user_id: u64,
    pub guild_id: u64,
    pub ingame_name: String,
    pub gear_score: i64,
    pub class: String,
    pub main_hand: String,
    pub offhand: String,
}

/// One page of the roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterPage {
    pub members: Vec<GuildMember>,
    /// Zero-based page index.
    pub page: u64,
    pub total_pages: u64,
}

impl RosterPage {
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }
}

/// Aggregate statistics for `/guild_stats`.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildStats {
    pub average_gear_score: i64,
    pub healers: usize,
    pub dps: usize,
    pub tanks: usize,
    /// Weapon pairs with counts. Each pair is ordered by name and the list is sorted.
    pub weapon_combos: Vec<((&'static str, &'static str), usize)>,
}

pub struct RosterService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RosterService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and stores a member's gear, replacing their previous submission.
    ///
    /// Weapons are checked before class so the first invalid field is reported.
    ///
    /// # Returns
    /// - `Ok(GuildMember)` - The stored entry
    /// - `Err(AppError::Validation)` - A field is invalid; the message lists valid options
    /// - `Err(AppError::DbErr)` - Database error during upsert
    pub async fn add_member(&self, input: AddMemberInput) -> Result<GuildMember, AppError> {
        let main_hand = Weapon::parse_for(&input.main_hand, "main hand")?;
        let offhand = Weapon::parse_for(&input.offhand, "offhand")?;
        let class = input.class.parse::<GuildClass>()?;

        let ingame_name = input.ingame_name.trim();
        if ingame_name.is_empty() {
            return Err(AppError::Validation(
                "In-game name cannot be empty.".to_string(),
            ));
        }
        let gear_score = i32::try_from(input.gear_score)
            .ok()
            .filter(|score| *score >= 0)
            .ok_or_else(|| {
                AppError::Validation("Gear score must be a positive number.".to_string())
            })?;

        let member = GuildMemberRepository::new(self.db)
            .upsert(UpsertGuildMemberParam {
                user_id: input.user_id,
                guild_id: input.guild_id,
                ingame_name: ingame_name.to_string(),
                gear_score,
                class,
                main_hand,
                offhand,
            })
            .await?;

        tracing::debug!(
            guild_id = member.guild_id,
            user_id = member.user_id,
            "Roster entry saved for {}",
            member.ingame_name
        );

        Ok(member)
    }

    /// Gets a roster page, clamping `page` to the last page.
    ///
    /// # Returns
    /// - `Ok(RosterPage)` - The requested (or last) page
    /// - `Err(AppError::NotFound)` - The guild has no roster entries
    pub async fn page(&self, guild_id: u64, page: u64) -> Result<RosterPage, AppError> {
        let repo = GuildMemberRepository::new(self.db);

        let (mut members, total) = repo
            .get_page_by_guild(guild_id, page, MEMBERS_PER_PAGE)
            .await?;
        if total == 0 {
            return Err(AppError::NotFound(
                "No members found in the database.".to_string(),
            ));
        }

        let total_pages = total.div_ceil(MEMBERS_PER_PAGE);
        let mut page = page;
        if page >= total_pages {
            page = total_pages - 1;
            (members, _) = repo
                .get_page_by_guild(guild_id, page, MEMBERS_PER_PAGE)
                .await?;
        }

        Ok(RosterPage {
            members,
            page,
            total_pages,
        })
    }

    /// Removes a member from the guild's roster by in-game name.
    ///
    /// # Returns
    /// - `Ok(())` - At least one entry was removed
    /// - `Err(AppError::NotFound)` - No entry in this guild has that name
    pub async fn remove_member(&self, guild_id: u64, ingame_name: &str) -> Result<(), AppError> {
        let deleted = GuildMemberRepository::new(self.db)
            .delete_by_name(guild_id, ingame_name.trim())
            .await?;

        if deleted == 0 {
            return Err(AppError::NotFound(format!(
                "No member found with the in-game name '{}' in this guild.",
                ingame_name.trim()
            )));
        }

        Ok(())
    }

    pub async fn stats(&self, guild_id: u64) -> Result<GuildStats, AppError> {
        let members = GuildMemberRepository::new(self.db)
            .get_all_by_guild(guild_id)
            .await?;

        compute_stats(&members)
            .ok_or_else(|| AppError::NotFound("No guild members found.".to_string()))
    }
}

/// Computes roster statistics, `None` for an empty roster.
pub fn compute_stats(members: &[GuildMember]) -> Option<GuildStats> {
    if members.is_empty() {
        return None;
    }

    let total: i64 = members.iter().map(|m| i64::from(m.gear_score)).sum();
    let average_gear_score = (total as f64 / members.len() as f64).round() as i64;

    let count_class = |class: GuildClass| members.iter().filter(|m| m.class == class).count();

    let mut combos: BTreeMap<(&'static str, &'static str), usize> = BTreeMap::new();
    for member in members {
        let (a, b) = (member.main_hand.as_str(), member.offhand.as_str());
        let pair = if a <= b { (a, b) } else { (b, a) };
        *combos.entry(pair).or_default() += 1;
    }

    Some(GuildStats {
        average_gear_score,
        healers: count_class(GuildClass::Healer),
        dps: count_class(GuildClass::Dps),
        tanks: count_class(GuildClass::Tank),
        weapon_combos: combos.into_iter().collect(),
    })
}

/// Renders a roster page as a `diff` code block, which colors lines by class prefix.
pub fn render_roster_page(page: &RosterPage) -> String {
    let mut text = String::from("**Guild Members List**\n```diff\n");
    text.push_str(&format!(
        " {:<15}| {:<15}| {:<15}| {:<15}| {:<15}\n",
        "Name", "Gear Score", "Class", "Main Hand", "Offhand"
    ));
    text.push_str(&"-".repeat(78));
    text.push('\n');

    for member in &page.members {
        let prefix = member.class.diff_prefix();
        text.push_str(&format!(
            "{}{:<15}| {:<15}| {}{:<15}| {:<15}| {:<15}\n",
            prefix,
            member.ingame_name,
            member.gear_score,
            prefix,
            member.class.as_str(),
            member.main_hand.as_str(),
            member.offhand.as_str()
        ));
    }

    text.push_str("```\n");
    text.push_str(&format!("Page {} of {}", page.page + 1, page.total_pages));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, error::TestError, factory};

    fn member(name: &str, gear: i32, class: GuildClass, main: Weapon, off: Weapon) -> GuildMember {
        GuildMember {
            user_id: 1,
            guild_id: 1,
            ingame_name: name.to_string(),
            gear_score: gear,
            class,
            main_hand: main,
            offhand: off,
        }
    }

    fn input(class: &str, main: &str, off: &str, gear: i64) -> AddMemberInput {
        AddMemberInput {
            user_id: 5,
            guild_id: 6,
            ingame_name: "Runner".to_string(),
            gear_score: gear,
            class: class.to_string(),
            main_hand: main.to_string(),
            offhand: off.to_string(),
        }
    }

    #[test]
    fn stats_average_classes_and_combos() {
        let members = vec![
            member("A", 3000, GuildClass::Healer, Weapon::WandAndTome, Weapon::Staff),
            member("B", 3001, GuildClass::Dps, Weapon::Staff, Weapon::WandAndTome),
            member("C", 2500, GuildClass::Tank, Weapon::SwordAndShield, Weapon::Greatsword),
        ];

        let stats = compute_stats(&members).unwrap();

        assert_eq!(stats.average_gear_score, 2834);
        assert_eq!((stats.healers, stats.dps, stats.tanks), (1, 1, 1));
        assert_eq!(
            stats.weapon_combos,
            vec![
                (("Greatsword", "SwordAndShield"), 1),
                (("Staff", "WandAndTome"), 2),
            ]
        );
    }

    #[test]
    fn stats_of_empty_roster() {
        assert!(compute_stats(&[]).is_none());
    }

    #[test]
    fn renders_page_with_class_prefixes() {
        let page = RosterPage {
            members: vec![
                member("Healbot", 3200, GuildClass::Healer, Weapon::WandAndTome, Weapon::Staff),
                member("Wall", 3100, GuildClass::Tank, Weapon::SwordAndShield, Weapon::Greatsword),
            ],
            page: 0,
            total_pages: 2,
        };

        let text = render_roster_page(&page);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "**Guild Members List**");
        assert_eq!(lines[1], "```diff");
        assert_eq!(lines[3], "-".repeat(78));
        assert!(lines[4].starts_with("+Healbot        | 3200           | +Healer"));
        assert!(lines[5].starts_with("#Wall"));
        assert_eq!(lines.last(), Some(&"Page 1 of 2"));
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[tokio::test]
    async fn add_member_validates_weapons_before_class() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::GuildMember)
            .build()
            .await?;
        let db = test.db.as_ref().unwrap();
        let service = RosterService::new(db);

        let err = service
            .add_member(input("Bard", "Spear", "Dagger", 100))
            .await
            .unwrap_err();
        assert!(err.user_message().starts_with("Invalid main hand weapon!"));

        let err = service
            .add_member(input("Bard", "Staff", "Dagger", 100))
            .await
            .unwrap_err();
        assert!(err.user_message().starts_with("Invalid class!"));

        let err = service
            .add_member(input("Tank", "Staff", "Dagger", -1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let stored = service
            .add_member(input("healer", "long bow", "dagger", 2900))
            .await
            .unwrap();
        assert_eq!(stored.class, GuildClass::Healer);
        assert_eq!(stored.main_hand, Weapon::LongBow);

        Ok(())
    }

    #[tokio::test]
    async fn page_clamps_to_last_page() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::GuildMember)
            .build()
            .await?;
        let db = test.db.as_ref().unwrap();

        for _ in 0..11 {
            factory::create_guild_member(db, "4").await?;
        }

        let service = RosterService::new(db);
        let page = service.page(4, 9).await.unwrap();

        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.members.len(), 1);
        assert!(!page.has_next());

        assert!(matches!(
            service.page(5, 0).await,
            Err(AppError::NotFound(_))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn remove_unknown_member_is_not_found() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::GuildMember)
            .build()
            .await?;
        let db = test.db.as_ref().unwrap();

        let service = RosterService::new(db);
        let err = service.remove_member(4, "Ghost").await.unwrap_err();

        assert_eq!(
            err.user_message(),
            "No member found with the in-game name 'Ghost' in this guild."
        );

        Ok(())
    }
}
