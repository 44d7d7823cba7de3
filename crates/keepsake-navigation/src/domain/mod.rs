//! Domain layer for scene navigation.

pub mod commands;
pub mod controller;
pub mod events;
pub mod scene;
pub mod transition;
