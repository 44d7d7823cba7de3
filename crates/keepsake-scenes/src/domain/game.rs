//! The heart mini-game page.
//!
//! A fresh [`HeartGrid`] is created on every visit and dropped on exit, so
//! leaving before the auto-advance fires cancels it.

use keepsake_content::domain::manifest::GameContent;
use keepsake_core::clock::Clock;
use keepsake_core::command::Command;
use keepsake_core::machine::StateMachine;
use keepsake_minigame::application::query_handlers::get_grid_view;
use keepsake_minigame::domain::grid::{FillOutcome, HeartGrid};
use keepsake_minigame::domain::layout::GridLayout;
use keepsake_navigation::domain::scene::{NavigationRequest, Scene, SceneContext};
use tracing::{info, warn};

use super::chrome::page;
use super::input::SceneInput;
use super::journal::log_events;

/// Fill-the-heart page. Advances on its own after a win and offers no manual
/// forward control.
#[derive(Debug)]
pub struct HeartGameScene {
    content: GameContent,
    layout: GridLayout,
    grid: Option<HeartGrid>,
    notice: Option<String>,
}

impl HeartGameScene {
    /// Creates the mini-game page from a validated layout.
    #[must_use]
    pub fn new(content: GameContent, layout: GridLayout) -> Self {
        Self {
            content,
            layout,
            grid: None,
            notice: None,
        }
    }

    /// The game in progress, while mounted.
    #[must_use]
    pub fn grid(&self) -> Option<&HeartGrid> {
        self.grid.as_ref()
    }

    fn drain(&mut self) {
        if let Some(grid) = self.grid.as_mut() {
            log_events(&grid.take_uncommitted_events());
        }
    }
}

impl Scene<SceneInput> for HeartGameScene {
    fn key(&self) -> &'static str {
        "heart_game"
    }

    fn manual_forward(&self) -> bool {
        false
    }

    fn enter(&mut self, _clock: &dyn Clock) {
        self.grid = Some(HeartGrid::new(&self.layout));
        self.notice = None;
    }

    fn exit(&mut self, _clock: &dyn Clock) {
        self.drain();
        if let Some(grid) = self.grid.take() {
            info!(game_id = %grid.id, won = grid.is_won(), "heart game left");
        }
    }

    fn handle(&mut self, input: &SceneInput, clock: &dyn Clock) -> Option<NavigationRequest> {
        let SceneInput::FillCell(command) = input else {
            return None;
        };
        let grid = self.grid.as_mut()?;
        match grid.fill(command.index, clock) {
            Ok(outcome) => {
                self.notice = None;
                if outcome == FillOutcome::Won {
                    info!(command = command.command_type(), game_id = %grid.id, "heart game won");
                }
            }
            Err(error) => {
                warn!(command = command.command_type(), %error, "cell click rejected");
                self.notice = Some(error.to_string());
            }
        }
        self.drain();
        None
    }

    fn tick(&mut self, clock: &dyn Clock) -> Option<NavigationRequest> {
        let grid = self.grid.as_mut()?;
        let fire = grid.poll_auto_advance(clock);
        self.drain();
        fire.then_some(NavigationRequest::Advance)
    }

    fn render(&self, context: &SceneContext) -> String {
        let mut body = vec![self.content.title.clone(), String::new()];
        if let Some(grid) = &self.grid {
            let view = get_grid_view(grid);
            body.extend(view.rows().into_iter().map(|row| {
                row.chars()
                    .map(|symbol| match symbol {
                        'H' => "♥",
                        'X' => "✕",
                        _ => "·",
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            }));
            body.push(String::new());
            if view.won {
                body.push(self.content.won_message.clone());
            } else {
                body.push(format!(
                    "{}/{} hearts (click 0-8)",
                    view.filled_count, view.target
                ));
            }
        }
        if let Some(notice) = &self.notice {
            body.push(notice.clone());
        }
        page("Fill the Heart", &body, context)
    }
}

#[cfg(test)]
mod tests {
    use keepsake_minigame::domain::commands::FillCell;
    use keepsake_minigame::domain::grid::AUTO_ADVANCE_DELAY_MS;
    use keepsake_minigame::domain::layout::REFERENCE_PATTERN;
    use keepsake_navigation::domain::scene::NavigationControls;
    use keepsake_test_support::ManualClock;

    use super::*;

    fn scene() -> HeartGameScene {
        let content = GameContent {
            title: "Fill the heart to continue".to_owned(),
            pattern: REFERENCE_PATTERN.to_owned(),
            target: 3,
            won_message: "You won my heart".to_owned(),
        };
        HeartGameScene::new(content, GridLayout::reference())
    }

    fn click(index: usize) -> SceneInput {
        SceneInput::FillCell(FillCell { index })
    }

    fn context() -> SceneContext {
        SceneContext {
            index: 1,
            scene_count: 6,
            controls: NavigationControls {
                back: true,
                next: false,
            },
            transition: None,
        }
    }

    #[test]
    fn test_win_then_auto_advance_after_delay() {
        // Arrange
        let clock = ManualClock::at_epoch();
        let mut scene = scene();
        scene.enter(&clock);

        // Act
        let on_click = scene.handle(&click(4), &clock);
        clock.advance_millis(AUTO_ADVANCE_DELAY_MS - 100);
        let early = scene.tick(&clock);
        clock.advance_millis(100);
        let due = scene.tick(&clock);
        let after = scene.tick(&clock);

        // Assert
        assert_eq!(on_click, None);
        assert_eq!(early, None);
        assert_eq!(due, Some(NavigationRequest::Advance));
        assert_eq!(after, None);
    }

    #[test]
    fn test_leaving_cancels_pending_advance() {
        // Arrange
        let clock = ManualClock::at_epoch();
        let mut scene = scene();
        scene.enter(&clock);
        scene.handle(&click(4), &clock);

        // Act
        scene.exit(&clock);
        clock.advance_millis(AUTO_ADVANCE_DELAY_MS * 2);
        let while_away = scene.tick(&clock);
        scene.enter(&clock);
        let after_return = scene.tick(&clock);

        // Assert
        assert_eq!(while_away, None);
        assert_eq!(after_return, None);
        assert_eq!(scene.grid().map(HeartGrid::filled_count), Some(2));
    }

    #[test]
    fn test_out_of_range_click_shows_notice() {
        let clock = ManualClock::at_epoch();
        let mut scene = scene();
        scene.enter(&clock);

        scene.handle(&click(12), &clock);

        assert!(scene.render(&context()).contains("validation error"));
    }

    #[test]
    fn test_render_shows_grid_and_won_overlay() {
        let clock = ManualClock::at_epoch();
        let mut scene = scene();
        scene.enter(&clock);
        let before = scene.render(&context());

        scene.handle(&click(4), &clock);
        let after = scene.render(&context());

        assert!(before.contains("♥ ✕ ✕\n✕ · ✕\n✕ ✕ ♥"));
        assert!(before.contains("2/3 hearts"));
        assert!(after.contains("You won my heart"));
        assert!(!after.contains("Next →"));
    }

    #[test]
    fn test_scene_hides_manual_forward() {
        assert!(!scene().manual_forward());
    }
}
