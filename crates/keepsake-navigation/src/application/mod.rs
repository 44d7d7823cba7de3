//! Application layer for scene navigation.

pub mod command_handlers;
pub mod query_handlers;
