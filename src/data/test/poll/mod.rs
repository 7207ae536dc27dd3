use crate::{
    data::poll::PollRepository,
    model::poll::{CreatePollParam, PollKind},
};
use test_utils::{builder::TestBuilder, error::TestError, factory};

mod create;
mod find_by_message_id;
