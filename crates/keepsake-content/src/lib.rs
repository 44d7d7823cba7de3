//! Keepsake — presentation content.
//!
//! Responsible for the YAML manifest that supplies every scene's text,
//! images, grid layout and tracks, its validation, and rendering the
//! Markdown letter to plain text.

pub mod application;
pub mod domain;
