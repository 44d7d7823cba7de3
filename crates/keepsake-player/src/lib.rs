//! Keepsake — playlist media player.
//!
//! Responsible for track selection, play/pause/seek, backend telemetry, and
//! discarding playback results that arrive after the player moved on.

pub mod application;
pub mod domain;
