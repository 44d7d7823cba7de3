//! Application layer for the scenes.

pub mod deck;
