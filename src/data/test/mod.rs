mod cycle_state;
mod group_settings;
mod guild_member;
mod poll;
mod welcome_message;
