//! Crossterm driver with a double-buffered diff flush.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::style::{
    Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{cursor, event, execute, queue, terminal};

use crate::buffer::{Buffer, Cell};
use crate::error::GridError;
use crate::event::Input;
use crate::style::{Rgb, TextStyle};
use crate::text::char_width;

/// Owns the screen while alive: raw mode, alternate screen and mouse capture
/// are restored on drop.
pub struct Terminal {
    stdout: io::Stdout,
    current: Buffer,
    previous: Buffer,
}

impl Terminal {
    pub fn new() -> Result<Self, GridError> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout,
            current: Buffer::new(width, height),
            previous: Buffer::new(width, height),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current.width(), self.current.height())
    }

    /// Wait up to `timeout` for input, then drain whatever else is pending.
    pub fn poll(&self, timeout: Duration) -> Result<Vec<Input>, GridError> {
        let mut inputs = Vec::new();
        if !event::poll(timeout)? {
            return Ok(inputs);
        }
        loop {
            if let Some(input) = Input::from_crossterm(event::read()?) {
                inputs.push(input);
            }
            if !event::poll(Duration::ZERO)? {
                break;
            }
        }
        Ok(inputs)
    }

    /// Render one frame. `paint` draws into a cleared buffer sized to the
    /// terminal; only cells that changed since the last frame are written.
    pub fn draw<R>(&mut self, paint: impl FnOnce(&mut Buffer) -> R) -> Result<R, GridError> {
        let (width, height) = terminal::size()?;
        if width != self.current.width() || height != self.current.height() {
            self.current = Buffer::new(width, height);
            self.previous = Buffer::new(width, height);
            queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }

        self.current.clear();
        let out = paint(&mut self.current);
        self.flush_diff()?;
        std::mem::swap(&mut self.current, &mut self.previous);
        Ok(out)
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut pen = Pen::default();
        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in self.current.diff(&self.previous) {
            if cell.continuation {
                continue;
            }
            if pen.next != Some((x, y)) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }
            pen.apply(&mut self.stdout, cell)?;
            write!(self.stdout, "{}", cell.symbol)?;
            let advance = char_width(cell.symbol).max(1) as u16;
            pen.next = Some((x + advance, y));
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Attributes last written to the terminal.
struct Pen {
    next: Option<(u16, u16)>,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    text: TextStyle,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            next: None,
            fg: None,
            bg: None,
            text: TextStyle::new(),
        }
    }
}

impl Pen {
    fn apply(&mut self, out: &mut impl Write, cell: &Cell) -> io::Result<()> {
        // intensity and italics/underline can only be cleared by a reset
        if cell.text != self.text {
            queue!(out, SetAttribute(Attribute::Reset))?;
            self.fg = None;
            self.bg = None;
            if cell.text.bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            if cell.text.dim {
                queue!(out, SetAttribute(Attribute::Dim))?;
            }
            if cell.text.italic {
                queue!(out, SetAttribute(Attribute::Italic))?;
            }
            if cell.text.underline {
                queue!(out, SetAttribute(Attribute::Underlined))?;
            }
            self.text = cell.text;
        }
        if self.fg != Some(cell.fg) {
            queue!(out, SetForegroundColor(rgb(cell.fg)))?;
            self.fg = Some(cell.fg);
        }
        if self.bg != Some(cell.bg) {
            queue!(out, SetBackgroundColor(rgb(cell.bg)))?;
            self.bg = Some(cell.bg);
        }
        Ok(())
    }
}

fn rgb(color: Rgb) -> CtColor {
    CtColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}
