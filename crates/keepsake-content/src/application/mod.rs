//! Application layer for presentation content.

pub mod loader;
