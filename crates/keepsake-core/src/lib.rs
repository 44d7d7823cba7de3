//! Keepsake Core — shared state-machine abstractions.
//!
//! This crate defines the traits and types that the navigation, mini-game
//! and player crates build on. It contains no infrastructure code.

pub mod audio;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod generation;
pub mod machine;
