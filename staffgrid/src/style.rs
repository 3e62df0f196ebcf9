//! Colors, text attributes and the theme that resolves semantic roles.

use crate::buffer::Brush;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct TextStyle {
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
}

impl TextStyle {
    pub const fn new() -> Self {
        Self {
            bold: false,
            dim: false,
            italic: false,
            underline: false,
        }
    }

    fn merge(self, other: TextStyle) -> Self {
        Self {
            bold: self.bold || other.bold,
            dim: self.dim || other.dim,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
        }
    }
}

/// Semantic color slots resolved through a [`Theme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Background,
    Foreground,
    Muted,
    Primary,
    Border,
    Header,
    Stripe,
    Selection,
    Cursor,
    Danger,
    Success,
}

/// A color that is either concrete or looked up in the theme at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paint {
    Role(Role),
    Rgb(Rgb),
}

impl From<Role> for Paint {
    fn from(role: Role) -> Self {
        Paint::Role(role)
    }
}

impl From<Rgb> for Paint {
    fn from(rgb: Rgb) -> Self {
        Paint::Rgb(rgb)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    pub fg: Option<Paint>,
    pub bg: Option<Paint>,
    pub text: TextStyle,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            text: TextStyle::new(),
        }
    }

    pub fn fg(mut self, paint: impl Into<Paint>) -> Self {
        self.fg = Some(paint.into());
        self
    }

    pub fn bg(mut self, paint: impl Into<Paint>) -> Self {
        self.bg = Some(paint.into());
        self
    }

    pub fn bold(mut self) -> Self {
        self.text.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.text.dim = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.text.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.text.underline = true;
        self
    }

    /// Layer `other` on top of `self`: colors set in `other` win, attributes accumulate.
    pub fn patch(self, other: Style) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            text: self.text.merge(other.text),
        }
    }
}

/// Concrete colors for every [`Role`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb,
    pub foreground: Rgb,
    pub muted: Rgb,
    pub primary: Rgb,
    pub border: Rgb,
    pub header: Rgb,
    pub stripe: Rgb,
    pub selection: Rgb,
    pub cursor: Rgb,
    pub danger: Rgb,
    pub success: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgb::hex(0x15141B),
            foreground: Rgb::hex(0xEDECEE),
            muted: Rgb::hex(0x6D6D6D),
            primary: Rgb::hex(0xA277FF),
            border: Rgb::hex(0x3D375E),
            header: Rgb::hex(0xB4B4C8),
            stripe: Rgb::hex(0x1C1B22),
            selection: Rgb::hex(0x6E5494),
            cursor: Rgb::hex(0x3B2F5C),
            danger: Rgb::hex(0xFF6767),
            success: Rgb::hex(0x61FFCA),
        }
    }
}

impl Theme {
    pub fn color(&self, role: Role) -> Rgb {
        match role {
            Role::Background => self.background,
            Role::Foreground => self.foreground,
            Role::Muted => self.muted,
            Role::Primary => self.primary,
            Role::Border => self.border,
            Role::Header => self.header,
            Role::Stripe => self.stripe,
            Role::Selection => self.selection,
            Role::Cursor => self.cursor,
            Role::Danger => self.danger,
            Role::Success => self.success,
        }
    }

    pub fn resolve(&self, paint: Paint) -> Rgb {
        match paint {
            Paint::Role(role) => self.color(role),
            Paint::Rgb(rgb) => rgb,
        }
    }

    /// Resolve a style into the concrete colors written to buffer cells.
    pub fn brush(&self, style: &Style) -> Brush {
        Brush {
            fg: style.fg.map_or(self.foreground, |p| self.resolve(p)),
            bg: style.bg.map_or(self.background, |p| self.resolve(p)),
            text: style.text,
        }
    }
}
