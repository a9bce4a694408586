//! Integration tests for story-player

mod helpers;

mod check_test;
mod cli_test;
mod config_test;
mod player_test;
