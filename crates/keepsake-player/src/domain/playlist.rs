//! Tracks and the fixed playlist.

use std::collections::HashSet;

use keepsake_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// One playable audio item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Stable identifier, unique within the playlist.
    pub id: u32,
    /// Display title.
    pub title: String,
    /// Opaque locator handed to the audio backend.
    pub audio_source: String,
    /// Opaque locator of the cover art.
    pub cover_image: String,
}

/// An ordered, non-empty, immutable track list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Validates a track list.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Content` if the list is empty or track ids repeat.
    pub fn new(tracks: Vec<Track>) -> Result<Self, DomainError> {
        if tracks.is_empty() {
            return Err(DomainError::Content("playlist has no tracks".to_owned()));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = tracks.iter().find(|track| !seen.insert(track.id)) {
            return Err(DomainError::Content(format!(
                "duplicate track id {}",
                duplicate.id
            )));
        }
        Ok(Self { tracks })
    }

    /// Number of tracks (never zero).
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Track at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in order.
    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Index after `index`, wrapping to the first track.
    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.tracks.len()
    }

    /// Index before `index`, wrapping to the last track.
    #[must_use]
    pub fn previous_index(&self, index: usize) -> usize {
        (index + self.tracks.len() - 1) % self.tracks.len()
    }
}
