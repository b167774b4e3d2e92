// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keys and modifiers understood by [`Select::key_down`](crate::Select::key_down).
//!
//! Hosts translate their platform key events into [`Key`] and [`Modifiers`]. [`Key`] also
//! parses from the usual key names so tests and scripted hosts can write `"ArrowDown".parse()`.

use alloc::string::String;
use core::str::FromStr;

/// A key relevant to select interaction.
///
/// `Tab`, `Shift` and `Character` are accepted so hosts can forward every key press, but
/// [`Select::key_down`](crate::Select::key_down) leaves them unhandled and returns `false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// Space bar.
    Space,
    /// Backspace.
    Backspace,
    /// Tab. Not handled; focus traversal stays with the host.
    Tab,
    /// Shift pressed on its own. Not handled.
    Shift,
    /// Any other printable character. Not handled; text arrives through
    /// [`Select::input_changed`](crate::Select::input_changed).
    Character(char),
}

bitflags::bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Alt / Option.
        const ALT   = 0b0000_0100;
        /// Meta / Command / Windows.
        const META  = 0b0000_1000;
    }
}

/// Error returned when a key name is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    /// The name was empty.
    #[error("empty key name")]
    Empty,
    /// The name matched no known key.
    #[error("unknown key name `{0}`")]
    Unknown(String),
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let key = match name {
            "" => return Err(KeyParseError::Empty),
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "Enter" | "Return" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            " " | "Space" | "Spacebar" => Self::Space,
            "Backspace" => Self::Backspace,
            "Tab" => Self::Tab,
            "Shift" => Self::Shift,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => return Err(KeyParseError::Unknown(name.into())),
                }
            }
        };
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn parses_common_names() {
        assert_eq!("ArrowDown".parse(), Ok(Key::Down));
        assert_eq!("Esc".parse(), Ok(Key::Escape));
        assert_eq!(" ".parse(), Ok(Key::Space));
        assert_eq!("x".parse(), Ok(Key::Character('x')));
        assert_eq!("".parse::<Key>(), Err(KeyParseError::Empty));
        assert_eq!(
            "Hyper".parse::<Key>(),
            Err(KeyParseError::Unknown("Hyper".into()))
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            KeyParseError::Unknown("F13".into()).to_string(),
            "unknown key name `F13`"
        );
    }

    #[test]
    fn modifiers_combine() {
        let mods = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(mods.contains(Modifiers::SHIFT));
        assert!(!mods.contains(Modifiers::ALT));
        assert!(Modifiers::default().is_empty());
    }
}
