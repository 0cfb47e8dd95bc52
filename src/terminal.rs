//! Terminal abstraction using crossterm

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyEvent},
    execute, queue,
    style::{self as term_style, Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::error::Result;
use crate::syntax::{Color, Style};

/// Events the editor reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermEvent {
    Key(KeyEvent),
    /// The terminal changed size; the new size is already stored
    Resize,
}

/// Raw-mode terminal on the alternate screen
///
/// Output is queued on stdout and only reaches the terminal on `flush`.
pub struct Terminal {
    cols: u16,
    rows: u16,
}

impl Terminal {
    /// Enter raw mode and the alternate screen
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let (cols, rows) = terminal::size()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { cols, rows })
    }

    /// Width in columns, as of the last resize
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Height in rows, as of the last resize
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Blocking read of the next key press or resize
    ///
    /// Mouse, focus and paste events are skipped.
    pub fn read_event(&mut self) -> Result<TermEvent> {
        loop {
            match event::read()? {
                Event::Key(key_event) => return Ok(TermEvent::Key(key_event)),
                Event::Resize(cols, rows) => {
                    self.cols = cols;
                    self.rows = rows;
                    return Ok(TermEvent::Resize);
                }
                _ => continue,
            }
        }
    }

    pub fn clear_screen(&mut self) -> Result<()> {
        self.queue_clear(ClearType::All)
    }

    /// Blank the rest of the current row
    pub fn clear_to_eol(&mut self) -> Result<()> {
        self.queue_clear(ClearType::UntilNewLine)
    }

    fn queue_clear(&mut self, kind: ClearType) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(kind))?;
        Ok(())
    }

    /// Place the cursor at a zero-based row and column
    pub fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(io::stdout(), cursor::MoveTo(col, row))?;
        Ok(())
    }

    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(io::stdout(), Print(s))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            queue!(io::stdout(), cursor::Show)?;
        } else {
            queue!(io::stdout(), cursor::Hide)?;
        }
        Ok(())
    }

    /// Queue colors and attributes for a highlight style
    pub fn apply_style(&mut self, style: &Style) -> Result<()> {
        queue!(
            io::stdout(),
            SetForegroundColor(to_crossterm(style.fg)),
            SetBackgroundColor(to_crossterm(style.bg))
        )?;
        let flags = [
            (style.bold, Attribute::Bold),
            (style.italic, Attribute::Italic),
            (style.reverse, Attribute::Reverse),
        ];
        for (on, attribute) in flags {
            if on {
                self.set_attribute(attribute)?;
            }
        }
        Ok(())
    }

    /// Reverse video, used for the menu bar, mode line and selection
    pub fn set_reverse(&mut self, enabled: bool) -> Result<()> {
        self.set_attribute(if enabled {
            Attribute::Reverse
        } else {
            Attribute::NoReverse
        })
    }

    /// Faint text for line numbers and the `~` filler
    pub fn set_dim(&mut self, enabled: bool) -> Result<()> {
        self.set_attribute(if enabled {
            Attribute::Dim
        } else {
            Attribute::NormalIntensity
        })
    }

    pub fn reset_attributes(&mut self) -> Result<()> {
        self.set_attribute(Attribute::Reset)
    }

    fn set_attribute(&mut self, attribute: Attribute) -> Result<()> {
        queue!(io::stdout(), SetAttribute(attribute))?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            SetAttribute(Attribute::Reset),
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Map a palette color to crossterm's
fn to_crossterm(color: Color) -> term_style::Color {
    match color {
        Color::Default => term_style::Color::Reset,
        Color::Black => term_style::Color::Black,
        Color::Red => term_style::Color::DarkRed,
        Color::Green => term_style::Color::DarkGreen,
        Color::Yellow => term_style::Color::DarkYellow,
        Color::Blue => term_style::Color::DarkBlue,
        Color::Magenta => term_style::Color::DarkMagenta,
        Color::Cyan => term_style::Color::DarkCyan,
        Color::White => term_style::Color::Grey,
        Color::BrightBlack => term_style::Color::DarkGrey,
        Color::BrightRed => term_style::Color::Red,
        Color::BrightGreen => term_style::Color::Green,
        Color::BrightYellow => term_style::Color::Yellow,
        Color::BrightBlue => term_style::Color::Blue,
        Color::BrightMagenta => term_style::Color::Magenta,
        Color::BrightCyan => term_style::Color::Cyan,
        Color::BrightWhite => term_style::Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_mapping() {
        assert_eq!(to_crossterm(Color::Default), term_style::Color::Reset);
        assert_eq!(to_crossterm(Color::BrightBlack), term_style::Color::DarkGrey);
        assert_eq!(to_crossterm(Color::Magenta), term_style::Color::DarkMagenta);
        assert_eq!(to_crossterm(Color::BrightWhite), term_style::Color::White);
    }
}
