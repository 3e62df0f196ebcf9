//! Terminal input, decoupled from crossterm.

use crossterm::event::{
    Event as CtEvent, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

/// Input the widgets react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key { key: Key, modifiers: Modifiers },
    /// Left mouse button press.
    Click { x: u16, y: u16 },
    Scroll { x: u16, y: u16, delta: i16 },
    Resize { width: u16, height: u16 },
}

impl Input {
    /// Translate a crossterm event; key releases and unsupported input map to `None`.
    pub fn from_crossterm(event: CtEvent) -> Option<Input> {
        match event {
            CtEvent::Key(key) if key.kind != KeyEventKind::Release => Some(Input::Key {
                key: Key::from_code(key.code)?,
                modifiers: key.modifiers.into(),
            }),
            CtEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(Input::Click {
                    x: mouse.column,
                    y: mouse.row,
                }),
                MouseEventKind::ScrollUp => Some(Input::Scroll {
                    x: mouse.column,
                    y: mouse.row,
                    delta: -1,
                }),
                MouseEventKind::ScrollDown => Some(Input::Scroll {
                    x: mouse.column,
                    y: mouse.row,
                    delta: 1,
                }),
                _ => None,
            },
            CtEvent::Resize(width, height) => Some(Input::Resize { width, height }),
            _ => None,
        }
    }

    /// Shorthand for an unmodified key press.
    pub fn key(key: Key) -> Input {
        Input::Key {
            key,
            modifiers: Modifiers::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    fn from_code(code: KeyCode) -> Option<Key> {
        let key = match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            _ => return None,
        };
        Some(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}
