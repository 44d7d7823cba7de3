//! Commands for scene navigation.
//!
//! These are issued by the host's navigation chrome. Scene content that
//! drives navigation itself goes through [`crate::domain::scene::NavigationRequest`].

use keepsake_core::command::Command;

/// Command to move to the next scene.
#[derive(Debug, Clone, Copy, Default)]
pub struct Advance;

impl Command for Advance {
    fn command_type(&self) -> &'static str {
        "navigation.advance"
    }
}

/// Command to move to the previous scene.
#[derive(Debug, Clone, Copy, Default)]
pub struct Retreat;

impl Command for Retreat {
    fn command_type(&self) -> &'static str {
        "navigation.retreat"
    }
}
