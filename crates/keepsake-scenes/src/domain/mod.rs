//! Domain layer for the scenes.

pub mod chrome;
pub mod closing;
pub mod cover;
pub mod game;
pub mod gallery;
pub mod input;
pub mod journal;
pub mod letter;
pub mod playlist;
