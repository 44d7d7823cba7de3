//! Application layer for the media player.

pub mod command_handlers;
pub mod query_handlers;
pub mod session;
