//! Shared test doubles and utilities for the Keepsake presentation engine.

mod audio;
mod clock;

pub use audio::{AudioCall, FailingAudioBackend, GatedAudioBackend, RecordingAudioBackend};
pub use clock::{FixedClock, ManualClock, test_epoch};
