//! Host-independent input events.
//!
//! Backends translate their native mouse and keyboard events into these types
//! before handing them to the ruler.

use std::fmt;
use std::str::FromStr;

use crate::error::RulerError;
use crate::geom::ScreenPoint;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button.
    Primary,
    /// Right button.
    Secondary,
    /// Middle button.
    Middle,
    /// Any other button.
    Other,
}

/// Modifier keys held while an event fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key.
    pub shift: bool,
    /// Control key.
    pub control: bool,
    /// Alt / option key.
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Only shift held.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
    };

    /// Only control held.
    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };
}

/// A pointer event in screen coordinates.
///
/// Data coordinates are resolved by the ruler through its surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Cursor position.
    pub position: ScreenPoint,
    /// Button that changed state (ignored for motion).
    pub button: PointerButton,
    /// Modifier keys held.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a pointer event.
    pub fn new(position: ScreenPoint, button: PointerButton, modifiers: Modifiers) -> Self {
        Self {
            position,
            button,
            modifiers,
        }
    }

    /// Create a motion event.
    pub fn motion(position: ScreenPoint, modifiers: Modifiers) -> Self {
        Self::new(position, PointerButton::Primary, modifiers)
    }
}

/// A key together with its modifiers, written as `ctrl+m`, `shift+r`, `m`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    /// Lower-case key name.
    pub key: String,
    /// Modifiers that must be held.
    pub modifiers: Modifiers,
}

impl KeyChord {
    /// Create a chord from a key and modifiers.
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into().to_lowercase(),
            modifiers,
        }
    }
}

impl FromStr for KeyChord {
    type Err = RulerError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || RulerError::InvalidKey {
            chord: text.to_string(),
        };
        let mut parts: Vec<&str> = text.split('+').map(str::trim).collect();
        let key = parts.pop().filter(|key| !key.is_empty()).ok_or_else(invalid)?;
        let mut modifiers = Modifiers::NONE;
        for part in parts {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.control = true,
                "shift" => modifiers.shift = true,
                "alt" | "option" => modifiers.alt = true,
                _ => return Err(invalid()),
            }
        }
        Ok(Self::new(key, modifiers))
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.control {
            write!(f, "ctrl+")?;
        }
        if self.modifiers.alt {
            write!(f, "alt+")?;
        }
        if self.modifiers.shift {
            write!(f, "shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_key() {
        let chord: KeyChord = "m".parse().unwrap();
        assert_eq!(chord, KeyChord::new("m", Modifiers::NONE));
    }

    #[test]
    fn parses_modifiers() {
        let chord: KeyChord = "Ctrl+M".parse().unwrap();
        assert_eq!(chord, KeyChord::new("m", Modifiers::CONTROL));
        assert_eq!(chord.to_string(), "ctrl+m");
    }

    #[test]
    fn modifiers_distinguish_chords() {
        let plain: KeyChord = "m".parse().unwrap();
        let ctrl: KeyChord = "control+m".parse().unwrap();
        assert_ne!(plain, ctrl);
    }

    #[test]
    fn rejects_unknown_modifier() {
        let err = "hyper+m".parse::<KeyChord>().unwrap_err();
        assert_eq!(
            err,
            RulerError::InvalidKey {
                chord: "hyper+m".to_string()
            }
        );
        assert!("ctrl+".parse::<KeyChord>().is_err());
    }
}
