//! Domain layer for the media player.

pub mod commands;
pub mod events;
pub mod format;
pub mod player;
pub mod playlist;
pub mod status;
pub mod ticket;
