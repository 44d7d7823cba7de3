//! Parsing of stdin command lines.

use keepsake_minigame::domain::commands::FillCell;
use keepsake_player::domain::commands::PlayerCommand;
use keepsake_scenes::domain::input::{PhotoStep, SceneInput};
use thiserror::Error;

/// Help text listing every command.
pub const HELP: &str = "commands: next | back | click <0-8> | play | skip | prev | \
track <n> | seek <secs> | photo next|prev | show | quit";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    /// Navigation chrome: forward.
    Next,
    /// Navigation chrome: back.
    Back,
    /// Input for the current scene.
    Scene(SceneInput),
    /// Redraw the current scene.
    Show,
    /// Print the command list.
    Help,
    /// Leave the presentation.
    Quit,
}

/// Errors produced while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The verb is not recognised.
    #[error("unknown command '{0}'")]
    Unknown(String),

    /// A required argument is missing.
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        /// The verb.
        command: &'static str,
        /// Description of the expected argument.
        argument: &'static str,
    },

    /// An argument did not parse.
    #[error("'{command}': invalid argument '{value}'")]
    InvalidArgument {
        /// The verb.
        command: &'static str,
        /// The offending text.
        value: String,
    },
}

/// Parses one line. Blank lines yield `None`.
///
/// # Errors
///
/// Returns `CommandError` for unknown verbs and missing or malformed
/// arguments.
pub fn parse_command(line: &str) -> Result<Option<HostCommand>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let argument = words.next();

    let command = match verb.to_ascii_lowercase().as_str() {
        "next" | "n" => HostCommand::Next,
        "back" | "b" => HostCommand::Back,
        "click" => HostCommand::Scene(SceneInput::FillCell(FillCell {
            index: number("click", "a cell index", argument)?,
        })),
        "play" | "pause" => HostCommand::Scene(SceneInput::Player(PlayerCommand::TogglePlayPause)),
        "skip" => HostCommand::Scene(SceneInput::Player(PlayerCommand::Next)),
        "prev" => HostCommand::Scene(SceneInput::Player(PlayerCommand::Previous)),
        "track" => HostCommand::Scene(SceneInput::Player(PlayerCommand::SelectTrack {
            index: number("track", "a track index", argument)?,
        })),
        "seek" => HostCommand::Scene(SceneInput::Player(PlayerCommand::Seek {
            seconds: number("seek", "a position in seconds", argument)?,
        })),
        "photo" => HostCommand::Scene(SceneInput::Photo(photo_step(argument)?)),
        "show" => HostCommand::Show,
        "help" | "?" => HostCommand::Help,
        "quit" | "exit" | "q" => HostCommand::Quit,
        _ => return Err(CommandError::Unknown(verb.to_owned())),
    };
    Ok(Some(command))
}

fn number<T: std::str::FromStr>(
    command: &'static str,
    argument_name: &'static str,
    argument: Option<&str>,
) -> Result<T, CommandError> {
    let value = argument.ok_or(CommandError::MissingArgument {
        command,
        argument: argument_name,
    })?;
    value.parse().map_err(|_| CommandError::InvalidArgument {
        command,
        value: value.to_owned(),
    })
}

fn photo_step(argument: Option<&str>) -> Result<PhotoStep, CommandError> {
    match argument {
        Some("next") => Ok(PhotoStep::Next),
        Some("prev" | "previous") => Ok(PhotoStep::Previous),
        Some(other) => Err(CommandError::InvalidArgument {
            command: "photo",
            value: other.to_owned(),
        }),
        None => Err(CommandError::MissingArgument {
            command: "photo",
            argument: "next or prev",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_and_control_verbs() {
        assert_eq!(parse_command("next"), Ok(Some(HostCommand::Next)));
        assert_eq!(parse_command("  BACK "), Ok(Some(HostCommand::Back)));
        assert_eq!(parse_command("show"), Ok(Some(HostCommand::Show)));
        assert_eq!(parse_command("quit"), Ok(Some(HostCommand::Quit)));
        assert_eq!(parse_command(""), Ok(None));
    }

    #[test]
    fn test_scene_inputs() {
        assert_eq!(
            parse_command("click 4"),
            Ok(Some(HostCommand::Scene(SceneInput::FillCell(FillCell { index: 4 }))))
        );
        assert_eq!(
            parse_command("track 2"),
            Ok(Some(HostCommand::Scene(SceneInput::Player(
                PlayerCommand::SelectTrack { index: 2 }
            ))))
        );
        assert_eq!(
            parse_command("seek 61.5"),
            Ok(Some(HostCommand::Scene(SceneInput::Player(
                PlayerCommand::Seek { seconds: 61.5 }
            ))))
        );
        assert_eq!(
            parse_command("photo prev"),
            Ok(Some(HostCommand::Scene(SceneInput::Photo(PhotoStep::Previous))))
        );
    }

    #[test]
    fn test_missing_argument() {
        let result = parse_command("click");

        assert_eq!(
            result,
            Err(CommandError::MissingArgument {
                command: "click",
                argument: "a cell index",
            })
        );
    }

    #[test]
    fn test_invalid_argument() {
        match parse_command("track two") {
            Err(CommandError::InvalidArgument { command, value }) => {
                assert_eq!(command, "track");
                assert_eq!(value, "two");
            }
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_verb() {
        assert_eq!(
            parse_command("dance").unwrap_err().to_string(),
            "unknown command 'dance'"
        );
    }
}
