//! Guild roster models.

use std::{fmt, str::FromStr};

use crate::{
    error::{internal::InternalError, AppError},
    util::parse::parse_u64_from_string,
};

/// In-game role of a roster member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GuildClass {
    Healer,
    Dps,
    Tank,
}

impl GuildClass {
    pub const ALL: [GuildClass; 3] = [GuildClass::Healer, GuildClass::Dps, GuildClass::Tank];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healer => "Healer",
            Self::Dps => "DPS",
            Self::Tank => "Tank",
        }
    }

    /// Line prefix used in the `diff` roster block, which colors the line by class.
    pub fn diff_prefix(&self) -> char {
        match self {
            Self::Healer => '+',
            Self::Dps => '-',
            Self::Tank => '#',
        }
    }
}

impl fmt::Display for GuildClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuildClass {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Invalid class! Please choose from: {}",
                    join_names(Self::ALL.iter().map(Self::as_str))
                ))
            })
    }
}

/// Weapon a roster member can wield in either hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weapon {
    Staff,
    Dagger,
    SwordAndShield,
    Greatsword,
    LongBow,
    Crossbow,
    WandAndTome,
}

impl Weapon {
    pub const ALL: [Weapon; 7] = [
        Weapon::Staff,
        Weapon::Dagger,
        Weapon::SwordAndShield,
        Weapon::Greatsword,
        Weapon::LongBow,
        Weapon::Crossbow,
        Weapon::WandAndTome,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "Staff",
            Self::Dagger => "Dagger",
            Self::SwordAndShield => "SwordAndShield",
            Self::Greatsword => "Greatsword",
            Self::LongBow => "Long Bow",
            Self::Crossbow => "Crossbow",
            Self::WandAndTome => "WandAndTome",
        }
    }

    /// Parses a weapon name, naming `hand` in the validation error.
    ///
    /// # Arguments
    /// - `value` - User input, matched case-insensitively
    /// - `hand` - "main hand" or "offhand", used in the error message
    pub fn parse_for(value: &str, hand: &str) -> Result<Self, AppError> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|weapon| weapon.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Invalid {} weapon! Please choose from: {}",
                    hand,
                    join_names(Self::ALL.iter().map(Self::as_str))
                ))
            })
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

/// A roster entry.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildMember {
    pub user_id: u64,
    pub guild_id: u64,
    pub ingame_name: String,
    pub gear_score: i32,
    pub class: GuildClass,
    pub main_hand: Weapon,
    pub offhand: Weapon,
}

impl GuildMember {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(GuildMember)` - Successfully converted
    /// - `Err(AppError::InternalError)` - Stored id or enum column could not be parsed
    pub fn from_entity(entity: entity::guild_member::Model) -> Result<Self, AppError> {
        let class = entity
            .class
            .parse::<GuildClass>()
            .map_err(|_| InternalError::UnknownStoredValue {
                column: "guild_member.class",
                value: entity.class.clone(),
            })?;
        let main_hand = stored_weapon("guild_member.main_hand", &entity.main_hand)?;
        let offhand = stored_weapon("guild_member.offhand", &entity.offhand)?;

        Ok(Self {
            user_id: parse_u64_from_string(entity.user_id)?,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            ingame_name: entity.ingame_name,
            gear_score: entity.gear_score,
            class,
            main_hand,
            offhand,
        })
    }
}

fn stored_weapon(column: &'static str, value: &str) -> Result<Weapon, InternalError> {
    Weapon::parse_for(value, "stored").map_err(|_| InternalError::UnknownStoredValue {
        column,
        value: value.to_string(),
    })
}

/// Parameters for adding or replacing a roster entry.
#[derive(Debug, Clone)]
pub struct UpsertGuildMemberParam {
    pub user_id: u64,
    pub guild_id: u64,
    pub ingame_name: String,
    pub gear_score: i32,
    pub class: GuildClass,
    pub main_hand: Weapon,
    pub offhand: Weapon,
}
