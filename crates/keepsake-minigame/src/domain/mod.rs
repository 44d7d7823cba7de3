//! Domain layer for the mini-game.

pub mod commands;
pub mod events;
pub mod grid;
pub mod layout;
