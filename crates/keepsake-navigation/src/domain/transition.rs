//! The fixed scene transition: fade plus horizontal slide.
//!
//! The incoming scene slides in from the right while fading in; the outgoing
//! scene slides out to the left while fading out. Both run on the same
//! ease-in-out curve over [`TRANSITION_DURATION_MS`].

use std::f64::consts::PI;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// Duration of every scene transition, in milliseconds.
pub const TRANSITION_DURATION_MS: i64 = 800;

/// Horizontal travel of a sliding scene, in layout units.
pub const SLIDE_DISTANCE: f64 = 100.0;

/// Returns the transition duration as a `TimeDelta`.
#[must_use]
pub fn transition_duration() -> TimeDelta {
    TimeDelta::milliseconds(TRANSITION_DURATION_MS)
}

/// A snapshot of an in-flight transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitionFrame {
    /// Outgoing scene, `None` for the initial entrance.
    pub from: Option<usize>,
    /// Incoming scene.
    pub to: usize,
    /// Linear progress in `[0, 1]`.
    pub progress: f64,
}

impl TransitionFrame {
    /// Samples a transition that started at `started_at`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sample(
        from: Option<usize>,
        to: usize,
        started_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        let elapsed = (now - started_at).num_milliseconds() as f64;
        let progress = (elapsed / TRANSITION_DURATION_MS as f64).clamp(0.0, 1.0);
        Self { from, to, progress }
    }

    /// Whether the transition has fully played out.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Progress after the ease-in-out curve.
    #[must_use]
    pub fn eased(&self) -> f64 {
        0.5 - 0.5 * (PI * self.progress).cos()
    }

    /// Opacity of the incoming scene.
    #[must_use]
    pub fn incoming_opacity(&self) -> f64 {
        self.eased()
    }

    /// Horizontal offset of the incoming scene (positive is to the right).
    #[must_use]
    pub fn incoming_offset(&self) -> f64 {
        SLIDE_DISTANCE * (1.0 - self.eased())
    }

    /// Opacity of the outgoing scene, if there is one.
    #[must_use]
    pub fn outgoing_opacity(&self) -> Option<f64> {
        self.from.map(|_| 1.0 - self.eased())
    }

    /// Horizontal offset of the outgoing scene, if there is one.
    #[must_use]
    pub fn outgoing_offset(&self) -> Option<f64> {
        self.from.map(|_| -SLIDE_DISTANCE * self.eased())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepsake_test_support::test_epoch;

    fn frame_after(millis: i64) -> TransitionFrame {
        let start = test_epoch();
        TransitionFrame::sample(Some(0), 1, start, start + TimeDelta::milliseconds(millis))
    }

    #[test]
    fn test_frame_starts_with_incoming_scene_offscreen_right() {
        let frame = frame_after(0);

        assert!(frame.incoming_opacity().abs() < 1e-9);
        assert!((frame.incoming_offset() - SLIDE_DISTANCE).abs() < 1e-9);
        assert_eq!(frame.outgoing_opacity(), Some(1.0));
        assert!(!frame.is_complete());
    }

    #[test]
    fn test_frame_at_midpoint_is_symmetric() {
        let frame = frame_after(TRANSITION_DURATION_MS / 2);

        assert!((frame.eased() - 0.5).abs() < 1e-9);
        assert!((frame.incoming_offset() - 50.0).abs() < 1e-9);
        assert!((frame.outgoing_offset().unwrap() + 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_frame_clamps_after_duration() {
        let frame = frame_after(5_000);

        assert!(frame.is_complete());
        assert!((frame.incoming_opacity() - 1.0).abs() < 1e-9);
        assert!(frame.incoming_offset().abs() < 1e-9);
    }

    #[test]
    fn test_initial_entrance_has_no_outgoing_scene() {
        let start = test_epoch();
        let frame = TransitionFrame::sample(None, 0, start, start);

        assert_eq!(frame.outgoing_opacity(), None);
        assert_eq!(frame.outgoing_offset(), None);
    }
}
