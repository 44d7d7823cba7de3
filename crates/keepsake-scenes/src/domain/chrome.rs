//! Shared text layout for scenes: position header, transition line and the
//! navigation controls footer.

use std::fmt::Write;

use keepsake_navigation::domain::scene::SceneContext;

/// Lays out a scene page around `body`.
#[must_use]
pub fn page(title: &str, body: &[String], context: &SceneContext) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{}/{}] {title}",
        context.index + 1,
        context.scene_count
    );
    if let Some(frame) = context.transition {
        let _ = writeln!(
            out,
            "(entering: opacity {:.0}%, offset {:+.0})",
            frame.incoming_opacity() * 100.0,
            frame.incoming_offset()
        );
    }
    out.push('\n');
    for line in body {
        out.push_str(line);
        out.push('\n');
    }

    let controls = controls_line(context);
    if !controls.is_empty() {
        out.push('\n');
        out.push_str(&controls);
        out.push('\n');
    }
    out
}

fn controls_line(context: &SceneContext) -> String {
    let mut parts = Vec::new();
    if context.controls.back {
        parts.push("← Back (back)");
    }
    if context.controls.next {
        parts.push("Next → (next)");
    }
    parts.join("    ")
}

#[cfg(test)]
mod tests {
    use keepsake_navigation::domain::scene::NavigationControls;

    use super::*;

    fn context(back: bool, next: bool) -> SceneContext {
        SceneContext {
            index: 2,
            scene_count: 6,
            controls: NavigationControls { back, next },
            transition: None,
        }
    }

    #[test]
    fn test_page_shows_position_and_offered_controls() {
        let text = page("Letter", &["Hello".to_owned()], &context(true, true));

        assert!(text.starts_with("[3/6] Letter\n"));
        assert!(text.contains("Hello\n"));
        assert!(text.contains("← Back (back)    Next → (next)"));
    }

    #[test]
    fn test_absent_controls_are_not_rendered() {
        let text = page("Game", &[], &context(true, false));

        assert!(text.contains("← Back (back)"));
        assert!(!text.contains("Next →"));
    }
}
