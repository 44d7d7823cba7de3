//! Keepsake terminal host.
//!
//! Reads commands from stdin, drives the scene controller, simulates audio
//! output and renders the current scene as text.

pub mod audio;
pub mod command;
pub mod config;
pub mod error;
pub mod host;
