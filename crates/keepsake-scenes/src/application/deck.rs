//! Deck builder: maps a manifest to the ordered scene list.

use std::sync::Arc;

use keepsake_content::domain::manifest::Manifest;
use keepsake_core::audio::AudioBackend;
use keepsake_core::error::DomainError;
use keepsake_navigation::domain::scene::Scene;
use keepsake_player::domain::ticket::PlayResolution;
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use crate::domain::closing::ClosingScene;
use crate::domain::cover::CoverScene;
use crate::domain::game::HeartGameScene;
use crate::domain::gallery::GalleryScene;
use crate::domain::input::SceneInput;
use crate::domain::letter::LetterScene;
use crate::domain::playlist::PlaylistScene;

/// A boxed scene accepting host input.
pub type BoxedScene = Box<dyn Scene<SceneInput>>;

/// Builds the six scenes in presentation order: cover, heart game, letter,
/// gallery, playlist, thank-you.
///
/// # Errors
///
/// Returns `DomainError::Content` if the grid layout or playlist in the
/// manifest is invalid.
pub fn build_deck(
    manifest: &Manifest,
    backend: Arc<dyn AudioBackend>,
    resolutions: UnboundedSender<PlayResolution>,
) -> Result<Vec<BoxedScene>, DomainError> {
    let layout = manifest.game.layout()?;
    let playlist = manifest.playlist.playlist()?;

    let deck: Vec<BoxedScene> = vec![
        Box::new(CoverScene::new(manifest.cover.clone())),
        Box::new(HeartGameScene::new(manifest.game.clone(), layout)),
        Box::new(LetterScene::new(manifest.letter.clone())),
        Box::new(GalleryScene::new(manifest.gallery.clone())),
        Box::new(PlaylistScene::new(
            &manifest.playlist,
            playlist,
            backend,
            resolutions,
        )),
        Box::new(ClosingScene::new(manifest.closing.clone())),
    ];
    info!(scenes = deck.len(), "deck built");
    Ok(deck)
}

#[cfg(test)]
mod tests {
    use keepsake_content::application::loader::load_manifest;
    use keepsake_core::machine::StateMachine;
    use keepsake_minigame::domain::commands::FillCell;
    use keepsake_minigame::domain::grid::AUTO_ADVANCE_DELAY_MS;
    use keepsake_navigation::domain::controller::SceneController;
    use keepsake_navigation::domain::transition::TRANSITION_DURATION_MS;
    use keepsake_player::domain::commands::PlayerCommand;
    use keepsake_test_support::{ManualClock, RecordingAudioBackend};
    use tokio::sync::mpsc;

    use super::*;

    fn settle(clock: &ManualClock, controller: &mut SceneController<SceneInput>) {
        clock.advance_millis(TRANSITION_DURATION_MS);
        controller.tick(clock);
    }

    fn keys(controller: &mut SceneController<SceneInput>, clock: &ManualClock) -> Vec<&'static str> {
        let mut keys = vec![controller.current_key()];
        while controller.current() + 1 < controller.scene_count() {
            if controller.current_key() == "heart_game" {
                controller.dispatch(&SceneInput::FillCell(FillCell { index: 4 }), clock);
                clock.advance_millis(AUTO_ADVANCE_DELAY_MS);
                controller.tick(clock);
            } else {
                controller.advance(clock);
            }
            keys.push(controller.current_key());
            settle(clock, controller);
        }
        keys
    }

    #[tokio::test]
    async fn test_default_deck_plays_in_order() {
        // Arrange
        let clock = ManualClock::at_epoch();
        let manifest = load_manifest(None).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        let deck = build_deck(&manifest, Arc::new(RecordingAudioBackend::new()), tx).unwrap();
        let mut controller = SceneController::new(deck, &clock).unwrap();
        settle(&clock, &mut controller);

        // Act
        let visited = keys(&mut controller, &clock);

        // Assert
        assert_eq!(
            visited,
            vec!["cover", "heart_game", "letter", "gallery", "playlist", "thank_you"]
        );
        assert!(!controller.advance(&clock));
        assert_eq!(controller.current(), 5);
    }

    #[tokio::test]
    async fn test_heart_game_offers_no_manual_forward() {
        let clock = ManualClock::at_epoch();
        let manifest = load_manifest(None).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        let deck = build_deck(&manifest, Arc::new(RecordingAudioBackend::new()), tx).unwrap();
        let mut controller = SceneController::new(deck, &clock).unwrap();
        settle(&clock, &mut controller);

        controller.advance(&clock);

        assert_eq!(controller.current_key(), "heart_game");
        assert!(!controller.controls().next);
        assert!(controller.controls().back);
    }

    #[tokio::test]
    async fn test_leaving_playlist_stops_audio() {
        // Arrange
        let clock = ManualClock::at_epoch();
        let manifest = load_manifest(None).unwrap();
        let backend = Arc::new(RecordingAudioBackend::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let deck = build_deck(&manifest, backend.clone(), tx).unwrap();
        let mut controller = SceneController::new(deck, &clock).unwrap();
        settle(&clock, &mut controller);
        for _ in 0..4 {
            if controller.current_key() == "heart_game" {
                controller.dispatch(&SceneInput::FillCell(FillCell { index: 4 }), &clock);
                clock.advance_millis(AUTO_ADVANCE_DELAY_MS);
                controller.tick(&clock);
            } else {
                controller.advance(&clock);
            }
            settle(&clock, &mut controller);
        }
        assert_eq!(controller.current_key(), "playlist");
        controller.dispatch(&SceneInput::Player(PlayerCommand::TogglePlayPause), &clock);
        let resolution = rx.recv().await.unwrap();
        controller.dispatch(&SceneInput::PlayResolved(resolution), &clock);

        // Act
        controller.retreat(&clock);

        // Assert
        assert_eq!(controller.current_key(), "gallery");
        assert_eq!(backend.stop_count(), 1);
        assert!(!controller.uncommitted_events().is_empty());
    }
}
