use crate::data::welcome_message::WelcomeMessageRepository;
use test_utils::{builder::TestBuilder, error::TestError};

mod upsert;
