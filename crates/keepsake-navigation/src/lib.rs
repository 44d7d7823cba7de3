//! Keepsake — scene navigation.
//!
//! Responsible for the scene cursor, scene mount/unmount lifecycle, and the
//! fixed fade/slide transition between scenes.

pub mod application;
pub mod domain;
