//! The presentation manifest: all content hosted by the scenes.

use std::collections::HashSet;

use keepsake_core::error::DomainError;
use keepsake_minigame::domain::layout::{DEFAULT_TARGET, GridLayout, REFERENCE_PATTERN};
use keepsake_player::domain::playlist::{Playlist, Track};
use serde::{Deserialize, Serialize};

/// Content for every scene, in presentation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Cover page.
    pub cover: CoverContent,
    /// Heart mini-game.
    pub game: GameContent,
    /// The letter.
    pub letter: LetterContent,
    /// Photo carousel.
    pub gallery: GalleryContent,
    /// Song list.
    pub playlist: PlaylistContent,
    /// Closing page.
    pub closing: ClosingContent,
}

/// Cover page text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverContent {
    /// Small line above the recipient.
    pub eyebrow: String,
    /// Recipient line.
    pub recipient: String,
    /// Headline lines, top to bottom.
    #[serde(default)]
    pub headline: Vec<String>,
    /// Optional artwork locator.
    #[serde(default)]
    pub image: Option<String>,
}

/// Mini-game text and layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameContent {
    /// Instruction shown above the grid.
    pub title: String,
    /// Compact 9-cell layout, e.g. `"HXX/X.X/XXH"`.
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// Hearts needed to win.
    #[serde(default = "default_target")]
    pub target: usize,
    /// Overlay shown once the game is won.
    pub won_message: String,
}

fn default_pattern() -> String {
    REFERENCE_PATTERN.to_owned()
}

fn default_target() -> usize {
    DEFAULT_TARGET
}

impl GameContent {
    /// Parses the layout.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Content` if the pattern or target is invalid.
    pub fn layout(&self) -> Result<GridLayout, DomainError> {
        GridLayout::parse(&self.pattern, self.target)
    }
}

/// Letter page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterContent {
    /// Small heading.
    pub heading: String,
    /// Large heading.
    pub subheading: String,
    /// Letter body in Markdown.
    pub body: String,
    /// Optional pinned photo locator.
    #[serde(default)]
    pub image: Option<String>,
}

/// One photo card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Image locator.
    pub image: String,
    /// Caption; no caption line is shown when absent.
    #[serde(default)]
    pub caption: Option<String>,
}

/// Photo carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryContent {
    /// Carousel title.
    pub title: String,
    /// Photos in order.
    pub photos: Vec<Photo>,
}

/// One track entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackEntry {
    /// Unique track id.
    pub id: u32,
    /// Display title.
    pub title: String,
    /// Audio locator.
    pub audio_source: String,
    /// Cover art locator.
    pub cover_image: String,
    /// Known duration; used by the simulated backend.
    #[serde(default)]
    pub duration_seconds: Option<f64>,
}

/// Song list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistContent {
    /// Page title.
    pub title: String,
    /// Tracks in order.
    pub tracks: Vec<TrackEntry>,
}

impl PlaylistContent {
    /// Builds the player's playlist.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Content` if there are no tracks or ids repeat.
    pub fn playlist(&self) -> Result<Playlist, DomainError> {
        Playlist::new(
            self.tracks
                .iter()
                .map(|entry| Track {
                    id: entry.id,
                    title: entry.title.clone(),
                    audio_source: entry.audio_source.clone(),
                    cover_image: entry.cover_image.clone(),
                })
                .collect(),
        )
    }

    /// Known duration of the track with `audio_source`, if declared.
    #[must_use]
    pub fn duration_of(&self, audio_source: &str) -> Option<f64> {
        self.tracks
            .iter()
            .find(|entry| entry.audio_source == audio_source)
            .and_then(|entry| entry.duration_seconds)
    }
}

/// Closing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosingContent {
    /// Small header tag.
    pub tag: String,
    /// Title.
    pub title: String,
    /// Subtitle.
    pub subtitle: String,
    /// Message lines.
    #[serde(default)]
    pub message: Vec<String>,
    /// Optional sticker locator.
    #[serde(default)]
    pub image: Option<String>,
    /// Footer line.
    pub footer: String,
}

impl Manifest {
    /// Checks every cross-field rule the scenes rely on.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Content` naming the first violation found.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.game.layout()?;

        if self.gallery.photos.is_empty() {
            return Err(DomainError::Content("gallery has no photos".to_owned()));
        }
        if let Some(photo) = self.gallery.photos.iter().find(|p| p.image.trim().is_empty()) {
            return Err(DomainError::Content(format!(
                "photo with caption {:?} has no image",
                photo.caption
            )));
        }

        self.playlist.playlist()?;
        let mut sources = HashSet::new();
        for entry in &self.playlist.tracks {
            if entry.audio_source.trim().is_empty() {
                return Err(DomainError::Content(format!(
                    "track {} has no audio source",
                    entry.id
                )));
            }
            if !sources.insert(entry.audio_source.as_str()) {
                return Err(DomainError::Content(format!(
                    "audio source {} is used by more than one track",
                    entry.audio_source
                )));
            }
            if let Some(duration) = entry
                .duration_seconds
                .filter(|d| !(d.is_finite() && *d > 0.0))
            {
                return Err(DomainError::Content(format!(
                    "track {} has invalid duration {duration}",
                    entry.id
                )));
            }
        }
        Ok(())
    }
}
