//! The letter page.

use keepsake_content::domain::letter::render_letter;
use keepsake_content::domain::manifest::LetterContent;
use keepsake_core::clock::Clock;
use keepsake_navigation::domain::scene::{NavigationRequest, Scene, SceneContext};

use super::chrome::page;
use super::input::SceneInput;

/// The letter, rendered from Markdown once at construction.
#[derive(Debug, Clone)]
pub struct LetterScene {
    content: LetterContent,
    blocks: Vec<String>,
}

impl LetterScene {
    /// Creates the letter page.
    #[must_use]
    pub fn new(content: LetterContent) -> Self {
        let blocks = render_letter(&content.body);
        Self { content, blocks }
    }
}

impl Scene<SceneInput> for LetterScene {
    fn key(&self) -> &'static str {
        "letter"
    }

    fn enter(&mut self, _clock: &dyn Clock) {}

    fn exit(&mut self, _clock: &dyn Clock) {}

    fn handle(&mut self, _input: &SceneInput, _clock: &dyn Clock) -> Option<NavigationRequest> {
        None
    }

    fn render(&self, context: &SceneContext) -> String {
        let mut body = vec![
            self.content.heading.clone(),
            self.content.subheading.clone(),
        ];
        if let Some(image) = &self.content.image {
            body.push(format!("[image: {image}]"));
        }
        for block in &self.blocks {
            body.push(String::new());
            body.push(block.clone());
        }
        page("Letter", &body, context)
    }
}
