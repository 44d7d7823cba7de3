//! The closing page.

use keepsake_content::domain::manifest::ClosingContent;
use keepsake_core::clock::Clock;
use keepsake_navigation::domain::scene::{NavigationRequest, Scene, SceneContext};

use super::chrome::page;
use super::input::SceneInput;

/// Static thank-you page; the last scene.
#[derive(Debug, Clone)]
pub struct ClosingScene {
    content: ClosingContent,
}

impl ClosingScene {
    /// Creates the closing page.
    #[must_use]
    pub fn new(content: ClosingContent) -> Self {
        Self { content }
    }
}

impl Scene<SceneInput> for ClosingScene {
    fn key(&self) -> &'static str {
        "thank_you"
    }

    fn enter(&mut self, _clock: &dyn Clock) {}

    fn exit(&mut self, _clock: &dyn Clock) {}

    fn handle(&mut self, _input: &SceneInput, _clock: &dyn Clock) -> Option<NavigationRequest> {
        None
    }

    fn render(&self, context: &SceneContext) -> String {
        let mut body = vec![
            self.content.tag.clone(),
            String::new(),
            self.content.title.clone(),
            self.content.subtitle.clone(),
            String::new(),
        ];
        body.extend(self.content.message.iter().cloned());
        if let Some(image) = &self.content.image {
            body.push(format!("[image: {image}]"));
        }
        body.push(String::new());
        body.push(self.content.footer.clone());
        page("Thank You", &body, context)
    }
}
