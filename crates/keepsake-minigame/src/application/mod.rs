//! Application layer for the mini-game.

pub mod query_handlers;
