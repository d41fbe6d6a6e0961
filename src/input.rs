//! Raw input → viewer commands.
//!
//! | Input                         | Command      |
//! |-------------------------------|--------------|
//! | previous button, `ArrowLeft`  | StepBack     |
//! | next button, `ArrowRight`     | StepForward  |
//! | reset button, `Space`         | Reset        |
//! | theme button                  | ToggleTheme  |
//! | swipe left (past threshold)   | StepForward  |
//! | swipe right (past threshold)  | StepBack     |

use crate::navigation::NavAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Navigate(NavAction),
    ToggleTheme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Previous,
    Next,
    Reset,
    Theme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Click(Button),
    KeyDown(Key),
    /// Horizontal touch positions at touch start and touch end.
    Swipe {
        start_x: f64,
        end_x: f64,
    },
}

/// Map one input event to a command, if it triggers one.
pub fn command_for(event: InputEvent, swipe_threshold: f64) -> Option<Command> {
    match event {
        InputEvent::Click(button) => Some(match button {
            Button::Previous => Command::Navigate(NavAction::StepBack),
            Button::Next => Command::Navigate(NavAction::StepForward),
            Button::Reset => Command::Navigate(NavAction::Reset),
            Button::Theme => Command::ToggleTheme,
        }),
        InputEvent::KeyDown(Key::ArrowLeft) => Some(Command::Navigate(NavAction::StepBack)),
        InputEvent::KeyDown(Key::ArrowRight) => Some(Command::Navigate(NavAction::StepForward)),
        InputEvent::KeyDown(Key::Space) => Some(Command::Navigate(NavAction::Reset)),
        InputEvent::KeyDown(Key::Other) => None,
        InputEvent::Swipe { start_x, end_x } => swipe_command(start_x, end_x, swipe_threshold),
    }
}

fn swipe_command(start_x: f64, end_x: f64, threshold: f64) -> Option<Command> {
    let diff = start_x - end_x;
    if diff.is_nan() || diff.abs() <= threshold {
        return None;
    }
    if diff > 0.0 {
        Some(Command::Navigate(NavAction::StepForward))
    } else {
        Some(Command::Navigate(NavAction::StepBack))
    }
}

/// Parse one line typed into the terminal front end.
///
/// Returns `Ok(None)` for the quit tokens and `Err` with the offending text
/// for anything unrecognized.
pub fn parse_line(line: &str) -> Result<Option<InputEvent>, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        // A bare Enter is the closest a line-based terminal gets to Space.
        return Ok(Some(InputEvent::KeyDown(Key::Space)));
    };
    let event = match head.to_ascii_lowercase().as_str() {
        "left" | "h" | "prev" | "p" => InputEvent::KeyDown(Key::ArrowLeft),
        "right" | "l" | "next" | "n" => InputEvent::KeyDown(Key::ArrowRight),
        "space" | "reset" | "r" => InputEvent::KeyDown(Key::Space),
        "theme" | "t" => InputEvent::Click(Button::Theme),
        "swipe" => {
            let coords: Vec<f64> = parts
                .map(str::parse)
                .collect::<Result<_, _>>()
                .map_err(|_| line.trim().to_string())?;
            match coords.as_slice() {
                [start_x, end_x] => InputEvent::Swipe {
                    start_x: *start_x,
                    end_x: *end_x,
                },
                _ => return Err(line.trim().to_string()),
            }
        }
        "q" | "quit" | "exit" => return Ok(None),
        _ => return Err(line.trim().to_string()),
    };
    Ok(Some(event))
}
