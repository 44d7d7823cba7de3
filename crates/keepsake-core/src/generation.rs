//! Generation tokens for discarding superseded asynchronous results.
//!
//! The counter moves forward whenever an in-flight operation becomes
//! irrelevant, such as on a track change or an unmount. Results tagged with an older generation are
//! dropped by the owner.

use serde::{Deserialize, Serialize};

/// A monotonically increasing tag identifying one asynchronous request epoch.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Generation(u64);

impl Generation {
    /// Returns the raw counter value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the generation that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Tracks the current generation of an owner.
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
    current: Generation,
}

impl GenerationCounter {
    /// Creates a counter starting at generation zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current generation.
    #[must_use]
    pub fn current(&self) -> Generation {
        self.current
    }

    /// Returns the generation the next request will carry.
    #[must_use]
    pub fn peek_next(&self) -> Generation {
        self.current.next()
    }

    /// Moves the counter forward to `generation` if it is newer.
    pub fn advance_to(&mut self, generation: Generation) {
        if generation > self.current {
            self.current = generation;
        }
    }

    /// Whether a token still belongs to the current generation.
    #[must_use]
    pub fn is_current(&self, generation: Generation) -> bool {
        self.current == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advancing_invalidates_previous_generation() {
        // Arrange
        let mut counter = GenerationCounter::new();
        let issued = counter.peek_next();
        counter.advance_to(issued);

        // Act
        let newer = counter.peek_next();
        counter.advance_to(newer);

        // Assert
        assert!(!counter.is_current(issued));
        assert!(counter.is_current(newer));
        assert!(newer > issued);
    }

    #[test]
    fn test_advance_to_never_moves_backwards() {
        let mut counter = GenerationCounter::new();
        let third = counter.peek_next().next().next();

        counter.advance_to(third);
        counter.advance_to(Generation::default().next());

        assert_eq!(counter.current(), third);
        assert_eq!(counter.current().value(), 3);
    }

    #[test]
    fn test_display_uses_short_tag() {
        assert_eq!(Generation::default().next().to_string(), "g1");
    }
}
