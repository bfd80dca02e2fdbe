//! Button to command mapping
//!
//! Three physical buttons. Up and Down also fire repeat events while held;
//! Select only clicks.

use crate::sim::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Up,
    Select,
    Down,
}

/// How the button event was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    /// Single click
    Single,
    /// Auto-repeat while held (every ~100 ms)
    Repeat,
}

/// Translate a raw button event into a simulation command
///
/// Select has no repeat variant, so a held Select maps to nothing.
pub fn map_button(button: Button, press: Press) -> Option<Command> {
    match (button, press) {
        (Button::Up, Press::Single) => Some(Command::Up),
        (Button::Up, Press::Repeat) => Some(Command::UpRepeat),
        (Button::Down, Press::Single) => Some(Command::Down),
        (Button::Down, Press::Repeat) => Some(Command::DownRepeat),
        (Button::Select, Press::Single) => Some(Command::Select),
        (Button::Select, Press::Repeat) => None,
    }
}
