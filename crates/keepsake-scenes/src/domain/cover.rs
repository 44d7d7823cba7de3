//! The cover page.

use keepsake_content::domain::manifest::CoverContent;
use keepsake_core::clock::Clock;
use keepsake_navigation::domain::scene::{NavigationRequest, Scene, SceneContext};

use super::chrome::page;
use super::input::SceneInput;

/// Static cover page.
#[derive(Debug, Clone)]
pub struct CoverScene {
    content: CoverContent,
}

impl CoverScene {
    /// Creates the cover page.
    #[must_use]
    pub fn new(content: CoverContent) -> Self {
        Self { content }
    }
}

impl Scene<SceneInput> for CoverScene {
    fn key(&self) -> &'static str {
        "cover"
    }

    fn enter(&mut self, _clock: &dyn Clock) {}

    fn exit(&mut self, _clock: &dyn Clock) {}

    fn handle(&mut self, _input: &SceneInput, _clock: &dyn Clock) -> Option<NavigationRequest> {
        None
    }

    fn render(&self, context: &SceneContext) -> String {
        let mut body = vec![
            self.content.eyebrow.clone(),
            self.content.recipient.clone(),
            String::new(),
        ];
        body.extend(self.content.headline.iter().cloned());
        if let Some(image) = &self.content.image {
            body.push(format!("[image: {image}]"));
        }
        page("Cover", &body, context)
    }
}
