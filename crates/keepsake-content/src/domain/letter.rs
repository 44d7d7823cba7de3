//! Markdown letter rendering.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Bullet prefixed to list items.
const BULLET: &str = "• ";

/// Renders Markdown to plain-text blocks, one per heading, paragraph or list
/// item. Inline markup is dropped; hard breaks split a block into separate
/// lines.
#[must_use]
pub fn render_letter(markdown: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => current.push_str(&text),
            Event::SoftBreak => current.push(' '),
            Event::HardBreak => flush(&mut blocks, &mut current),
            Event::Start(Tag::Item) => current.push_str(BULLET),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => {
                flush(&mut blocks, &mut current);
            }
            _ => {}
        }
    }
    flush(&mut blocks, &mut current);
    blocks
}

fn flush(blocks: &mut Vec<String>, current: &mut String) {
    let text = current.trim();
    if !text.is_empty() && text != BULLET.trim() {
        blocks.push(text.to_owned());
    }
    current.clear();
}
