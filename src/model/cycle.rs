//! Archboss cycle tag.

use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

use crate::error::{internal::InternalError, AppError};

/// Which kind of archboss the next weekly spawn is.
///
/// Alternates with every weekly occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleState {
    Conflict,
    #[default]
    Peace,
}

impl CycleState {
    /// The state after one weekly occurrence.
    pub fn advance(self) -> Self {
        match self {
            Self::Conflict => Self::Peace,
            Self::Peace => Self::Conflict,
        }
    }

    /// The state after `steps` weekly occurrences.
    pub fn advance_by(self, steps: u64) -> Self {
        if steps % 2 == 0 {
            self
        } else {
            self.advance()
        }
    }

    /// Value stored in the `cycle_state.state` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conflict => "conflict",
            Self::Peace => "peace",
        }
    }

    pub fn boss_label(&self) -> &'static str {
        match self {
            Self::Conflict => "Conflict Boss",
            Self::Peace => "Peace Boss",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Conflict => "🔴",
            Self::Peace => "🔵",
        }
    }

    /// Label used for the archboss occurrence this state applies to.
    pub fn archboss_label(&self) -> String {
        format!("Archboss ({})", self.boss_label())
    }
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CycleState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "conflict" => Ok(Self::Conflict),
            "peace" => Ok(Self::Peace),
            other => Err(other.to_string()),
        }
    }
}

/// Persisted cycle row.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleRecord {
    pub id: i32,
    pub state: CycleState,
    /// Weekly occurrence `state` labels. `None` until first synchronized.
    pub occurrence: Option<DateTime<Utc>>,
}

impl CycleRecord {
    pub fn from_entity(entity: entity::cycle_state::Model) -> Result<Self, AppError> {
        let state = entity
            .state
            .parse::<CycleState>()
            .map_err(|value| InternalError::UnknownStoredValue {
                column: "cycle_state.state",
                value,
            })?;

        Ok(Self {
            id: entity.id,
            state,
            occurrence: entity.occurrence,
        })
    }
}

/// Parameters for saving the active cycle row.
#[derive(Debug, Clone)]
pub struct SaveCycleParam {
    pub state: CycleState,
    pub occurrence: DateTime<Utc>,
}
