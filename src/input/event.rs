//! Terminal event types.

use crate::input::keyboard::KeyEvent;
use crate::terminal::MouseEvent;

/// A terminal event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Terminal size in cells.
    Resize { width: u16, height: u16 },
    FocusGained,
    FocusLost,
    /// Text delivered through bracketed paste.
    Paste(String),
}

impl Event {
    #[must_use]
    pub fn key(&self) -> Option<&KeyEvent> {
        match self {
            Self::Key(e) => Some(e),
            _ => None,
        }
    }

    #[must_use]
    pub fn mouse(&self) -> Option<&MouseEvent> {
        match self {
            Self::Mouse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<KeyEvent> for Event {
    fn from(e: KeyEvent) -> Self {
        Self::Key(e)
    }
}

impl From<MouseEvent> for Event {
    fn from(e: MouseEvent) -> Self {
        Self::Mouse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;
    use crate::terminal::MouseButton;

    #[test]
    fn test_accessors() {
        let key = KeyEvent::key(KeyCode::Enter);
        let event: Event = key.into();
        assert_eq!(event.key(), Some(&key));
        assert_eq!(event.mouse(), None);

        let mouse = MouseEvent::press(3, 4, MouseButton::Left);
        let event: Event = mouse.into();
        assert_eq!(event.mouse(), Some(&mouse));
        assert_eq!(event.key(), None);
    }
}
