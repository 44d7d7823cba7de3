//! The photo carousel page.

use keepsake_content::domain::manifest::{GalleryContent, Photo};
use keepsake_core::clock::Clock;
use keepsake_navigation::domain::scene::{NavigationRequest, Scene, SceneContext};
use tracing::debug;

use super::chrome::page;
use super::input::{PhotoStep, SceneInput};

/// Carousel over the manifest's photos. Wraps in both directions and starts
/// from the first photo on every visit.
#[derive(Debug, Clone)]
pub struct GalleryScene {
    content: GalleryContent,
    index: usize,
}

impl GalleryScene {
    /// Creates the carousel. The manifest guarantees at least one photo.
    #[must_use]
    pub fn new(content: GalleryContent) -> Self {
        Self { content, index: 0 }
    }

    /// Index of the photo on display.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The photo on display.
    #[must_use]
    pub fn photo(&self) -> Option<&Photo> {
        self.content.photos.get(self.index)
    }

    fn step(&mut self, step: PhotoStep) {
        let count = self.content.photos.len();
        if count == 0 {
            return;
        }
        self.index = match step {
            PhotoStep::Next => (self.index + 1) % count,
            PhotoStep::Previous => (self.index + count - 1) % count,
        };
        debug!(index = self.index, ?step, "gallery stepped");
    }
}

impl Scene<SceneInput> for GalleryScene {
    fn key(&self) -> &'static str {
        "gallery"
    }

    fn enter(&mut self, _clock: &dyn Clock) {
        self.index = 0;
    }

    fn exit(&mut self, _clock: &dyn Clock) {}

    fn handle(&mut self, input: &SceneInput, _clock: &dyn Clock) -> Option<NavigationRequest> {
        if let SceneInput::Photo(step) = input {
            self.step(*step);
        }
        None
    }

    fn render(&self, context: &SceneContext) -> String {
        let mut body = vec![self.content.title.clone(), String::new()];
        if let Some(photo) = self.photo() {
            body.push(format!("[photo: {}]", photo.image));
            if let Some(caption) = &photo.caption {
                body.push(caption.clone());
            }
            body.push(format!(
                "‹ {}/{} › (photo prev | photo next)",
                self.index + 1,
                self.content.photos.len()
            ));
        }
        page("Photos", &body, context)
    }
}

#[cfg(test)]
mod tests {
    use keepsake_navigation::domain::scene::NavigationControls;
    use keepsake_test_support::FixedClock;
    use keepsake_test_support::test_epoch;

    use super::*;

    fn gallery() -> GalleryScene {
        GalleryScene::new(GalleryContent {
            title: "Special Photo Cards".to_owned(),
            photos: vec![
                Photo {
                    image: "pic1.jpg".to_owned(),
                    caption: Some("Some Flowers For You".to_owned()),
                },
                Photo {
                    image: "pic2.jpg".to_owned(),
                    caption: None,
                },
                Photo {
                    image: "pic3.jpg".to_owned(),
                    caption: Some("Hehe".to_owned()),
                },
            ],
        })
    }

    fn context() -> SceneContext {
        SceneContext {
            index: 3,
            scene_count: 6,
            controls: NavigationControls {
                back: true,
                next: true,
            },
            transition: None,
        }
    }

    #[test]
    fn test_steps_wrap_in_both_directions() {
        // Arrange
        let clock = FixedClock(test_epoch());
        let mut scene = gallery();
        scene.enter(&clock);

        // Act
        scene.handle(&SceneInput::Photo(PhotoStep::Previous), &clock);
        let after_previous = scene.index();
        for _ in 0..2 {
            scene.handle(&SceneInput::Photo(PhotoStep::Next), &clock);
        }

        // Assert
        assert_eq!(after_previous, 2);
        assert_eq!(scene.index(), 1);
    }

    #[test]
    fn test_reentering_starts_from_first_photo() {
        let clock = FixedClock(test_epoch());
        let mut scene = gallery();
        scene.enter(&clock);
        scene.handle(&SceneInput::Photo(PhotoStep::Next), &clock);

        scene.exit(&clock);
        scene.enter(&clock);

        assert_eq!(scene.index(), 0);
    }

    #[test]
    fn test_missing_caption_renders_no_caption_line() {
        let clock = FixedClock(test_epoch());
        let mut scene = gallery();
        scene.enter(&clock);
        scene.handle(&SceneInput::Photo(PhotoStep::Next), &clock);

        let text = scene.render(&context());

        assert!(text.contains("[photo: pic2.jpg]\n‹ 2/3 ›"));
    }
}
