//! Keepsake — scenes.
//!
//! The six pages of the presentation, each implementing the navigation
//! `Scene` lifecycle, and the deck builder that turns a manifest into the
//! ordered scene list.

pub mod application;
pub mod domain;
