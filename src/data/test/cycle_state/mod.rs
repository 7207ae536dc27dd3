use crate::{
    data::cycle_state::CycleStateRepository,
    model::cycle::{CycleState, SaveCycleParam},
};
use chrono::{TimeZone, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, error::TestError};

mod save;
