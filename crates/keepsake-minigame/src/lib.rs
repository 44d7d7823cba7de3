//! Keepsake — fill-the-heart mini-game.
//!
//! A 3×3 grid where the player fills empty cells until a target number of
//! hearts is reached. Winning schedules a single delayed request to advance
//! the presentation.

pub mod application;
pub mod domain;
