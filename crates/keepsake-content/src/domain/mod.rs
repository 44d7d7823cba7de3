//! Domain layer for presentation content.

pub mod letter;
pub mod manifest;
