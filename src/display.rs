//! Display rendering
//!
//! Screen layout, top to bottom: menu bar, text area, mode line, message line.

use std::collections::HashMap;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::Config;
use crate::error::Result;
use crate::input::MenuCommand;
use crate::surface::Surface;
use crate::syntax::{Category, Style};
use crate::terminal::Terminal;
use crate::view::Segment;
use crate::viewport::Viewport;

/// Rows taken by the menu bar, mode line and message line
pub const CHROME_ROWS: u16 = 3;

/// Styles per highlight class
#[derive(Debug, Clone)]
pub struct Theme {
    styles: HashMap<Category, Style>,
}

impl Theme {
    /// Default styles with the config's color overrides applied
    pub fn from_config(config: &Config) -> Self {
        let mut theme = Self::default();
        for (category, color) in config.color_overrides() {
            let style = theme.style(Some(category)).with_fg(color);
            theme.styles.insert(category, style);
        }
        theme
    }

    /// Style for a run class (`None` is plain text)
    pub fn style(&self, class: Option<Category>) -> Style {
        class
            .and_then(|category| self.styles.get(&category).copied())
            .unwrap_or_default()
    }
}

impl Default for Theme {
    fn default() -> Self {
        let styles = Category::ALL
            .into_iter()
            .map(|category| (category, category.default_style()))
            .collect();
        Self { styles }
    }
}

/// Display state
pub struct Display {
    /// Whether a full redraw is needed
    needs_redraw: bool,
    /// Message to show in the bottom line
    message: Option<String>,
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    theme: Theme,
}

impl Display {
    pub fn new(config: &Config) -> Self {
        Self {
            needs_redraw: true,
            message: None,
            show_line_numbers: config.show_line_numbers,
            theme: Theme::from_config(config),
        }
    }

    /// Toggle line numbers on/off
    pub fn toggle_line_numbers(&mut self) {
        self.show_line_numbers = !self.show_line_numbers;
        self.needs_redraw = true;
    }

    /// Calculate width needed for line numbers (including separator)
    fn line_number_width(&self, line_count: usize) -> usize {
        if !self.show_line_numbers {
            return 0;
        }
        let digits = line_count.max(1).to_string().len();
        digits.max(3) + 1 // minimum 3 digits + space
    }

    /// Mark that a full redraw is needed
    pub fn force_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Set a message to display
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Clear the message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Get the current message
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Render the whole screen
    pub fn render(
        &mut self,
        terminal: &mut Terminal,
        surface: &Surface,
        viewport: &mut Viewport,
    ) -> Result<()> {
        let cols = terminal.cols() as usize;
        let rows = terminal.rows();
        if rows < CHROME_ROWS + 1 || cols == 0 {
            return Ok(());
        }

        viewport.set_height((rows - CHROME_ROWS) as usize);
        let (caret_line, caret_col) = surface.caret_line_col().unwrap_or((0, 0));
        viewport.ensure_visible(caret_line);

        terminal.set_cursor_visible(false)?;
        if self.needs_redraw {
            terminal.clear_screen()?;
        }

        self.render_menu_bar(terminal, cols)?;

        let lines = surface.view().lines();
        let selected = surface
            .caret_range()
            .filter(|range| !range.is_collapsed())
            .map(|range| (range.start, range.end));
        let lnum_width = self.line_number_width(lines.len());
        let text_cols = cols.saturating_sub(lnum_width);

        for row_offset in 0..viewport.height() {
            let screen_row = 1 + row_offset as u16;
            let line_idx = viewport.top_line() + row_offset;
            terminal.move_cursor(screen_row, 0)?;

            if let Some(segments) = lines.get(line_idx) {
                if self.show_line_numbers {
                    let lnum_str = format!("{:>width$} ", line_idx + 1, width = lnum_width - 1);
                    terminal.set_dim(true)?;
                    terminal.write_str(&lnum_str)?;
                    terminal.set_dim(false)?;
                }
                self.render_line(terminal, segments, selected, text_cols)?;
            } else {
                // Empty line indicator (like vim's ~)
                if self.show_line_numbers {
                    terminal.write_str(&" ".repeat(lnum_width))?;
                }
                terminal.set_dim(true)?;
                terminal.write_str("~")?;
                terminal.set_dim(false)?;
            }

            terminal.clear_to_eol()?;
        }

        self.render_mode_line(terminal, surface, caret_line, caret_col, rows - 2, cols)?;
        self.render_message_line(terminal, rows - 1, cols)?;

        // Position cursor in the text area
        let line_text: String = lines
            .get(caret_line)
            .map(|segments| segments.iter().map(|s| s.text.as_str()).collect())
            .unwrap_or_default();
        let display_col = char_col_to_width(&line_text, caret_col);
        let screen_row = 1 + caret_line.saturating_sub(viewport.top_line()) as u16;
        let screen_col = (lnum_width + display_col).min(cols - 1) as u16;
        terminal.move_cursor(screen_row, screen_col)?;

        terminal.set_cursor_visible(true)?;
        terminal.flush()?;

        self.needs_redraw = false;
        Ok(())
    }

    /// Render the menu bar
    fn render_menu_bar(&self, terminal: &mut Terminal, cols: usize) -> Result<()> {
        terminal.move_cursor(0, 0)?;
        terminal.set_reverse(true)?;
        let padded = pad_to_width(&menu_bar_text(), cols, ' ');
        terminal.write_str(&padded)?;
        terminal.set_reverse(false)?;
        Ok(())
    }

    /// Render one line of segments, reversing the selected part
    fn render_line(
        &self,
        terminal: &mut Terminal,
        segments: &[Segment],
        selected: Option<(usize, usize)>,
        max_cols: usize,
    ) -> Result<()> {
        let mut remaining = max_cols;

        for segment in segments {
            let base = self.theme.style(segment.class);
            for (text, in_selection) in split_selection(segment, selected) {
                if remaining == 0 {
                    break;
                }
                let style = if in_selection { base.with_reverse() } else { base };
                let display_text = truncate_to_width(&text, remaining);
                remaining -= display_text.width();

                if style.is_default() {
                    terminal.write_str(&display_text)?;
                } else {
                    terminal.apply_style(&style)?;
                    terminal.write_str(&display_text)?;
                    terminal.reset_attributes()?;
                }
            }
        }

        Ok(())
    }

    /// Render the mode line
    fn render_mode_line(
        &self,
        terminal: &mut Terminal,
        surface: &Surface,
        caret_line: usize,
        caret_col: usize,
        row: u16,
        cols: usize,
    ) -> Result<()> {
        terminal.move_cursor(row, 0)?;
        terminal.set_reverse(true)?;

        let offset = surface
            .caret_range()
            .map(|range| range.end.to_string())
            .unwrap_or_else(|| "-".to_string());
        let mode_line = format!(
            "-- bracepad: *untitled* L{}:C{} @{} spans:{} hl:{} ",
            caret_line + 1,
            caret_col + 1,
            offset,
            surface.spans().len(),
            if surface.highlighting() { "on" } else { "off" },
        );

        terminal.write_str(&pad_to_width(&mode_line, cols, '-'))?;
        terminal.set_reverse(false)?;

        Ok(())
    }

    /// Render the message line
    fn render_message_line(&self, terminal: &mut Terminal, row: u16, cols: usize) -> Result<()> {
        terminal.move_cursor(row, 0)?;

        if let Some(msg) = self.message() {
            let truncated = truncate_to_width(msg, cols);
            terminal.write_str(&truncated)?;
        }

        terminal.clear_to_eol()?;
        Ok(())
    }
}

/// Text of the menu bar
fn menu_bar_text() -> String {
    let entries: Vec<String> = MenuCommand::ALL
        .iter()
        .map(|command| format!("{} {}", command.shortcut(), command.label()))
        .collect();
    format!(" File | {}", entries.join("  "))
}

/// Split a segment into pieces inside and outside the selected range
fn split_selection(segment: &Segment, selected: Option<(usize, usize)>) -> Vec<(String, bool)> {
    let Some((sel_start, sel_end)) = selected else {
        return vec![(segment.text.clone(), false)];
    };

    let mut pieces: Vec<(String, bool)> = Vec::new();
    for (i, ch) in segment.text.chars().enumerate() {
        let offset = segment.start + i;
        let inside = offset >= sel_start && offset < sel_end;
        match pieces.last_mut() {
            Some((text, flag)) if *flag == inside => {
                text.push(ch);
                continue;
            }
            _ => {}
        }
        pieces.push((ch.to_string(), inside));
    }
    pieces
}

/// Display width of the first `col` chars of a line
fn char_col_to_width(line: &str, col: usize) -> usize {
    line.chars()
        .take(col)
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(1))
        .sum()
}

/// Pad (or truncate) a string to exactly `width` columns
fn pad_to_width(s: &str, width: usize, fill: char) -> String {
    let truncated = truncate_to_width(s, width);
    let used = truncated.width();
    let mut padded = truncated;
    padded.extend(std::iter::repeat(fill).take(width.saturating_sub(used)));
    padded
}

/// Truncate a string to fit within a display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Color;

    fn segment(text: &str, start: usize) -> Segment {
        Segment {
            class: None,
            text: text.to_string(),
            start,
        }
    }

    #[test]
    fn test_split_selection() {
        let seg = segment("abcdef", 10);
        assert_eq!(split_selection(&seg, None), [("abcdef".to_string(), false)]);
        assert_eq!(
            split_selection(&seg, Some((12, 14))),
            [
                ("ab".to_string(), false),
                ("cd".to_string(), true),
                ("ef".to_string(), false),
            ]
        );
        assert_eq!(split_selection(&seg, Some((0, 99))), [("abcdef".to_string(), true)]);
    }

    #[test]
    fn test_truncate_and_pad() {
        assert_eq!(truncate_to_width("hello", 3), "hel");
        assert_eq!(truncate_to_width("你好", 3), "你");
        assert_eq!(pad_to_width("ab", 5, '-'), "ab---");
        assert_eq!(pad_to_width("abcdef", 4, '-'), "abcd");
    }

    #[test]
    fn test_char_col_to_width() {
        assert_eq!(char_col_to_width("ab你c", 3), 4);
        assert_eq!(char_col_to_width("ab", 10), 2);
    }

    #[test]
    fn test_menu_bar_lists_commands() {
        let text = menu_bar_text();
        for command in MenuCommand::ALL {
            assert!(text.contains(command.label()));
        }
    }

    #[test]
    fn test_theme_overrides() {
        let mut config = Config::default();
        config.colors.insert("keyword".to_string(), "red".to_string());
        let theme = Theme::from_config(&config);

        let keyword = theme.style(Some(Category::Keyword));
        assert_eq!(keyword.fg, Color::Red);
        assert!(keyword.bold);
        assert_eq!(theme.style(Some(Category::Number)), Category::Number.default_style());
        assert!(theme.style(None).is_default());
    }

    #[test]
    fn test_line_number_width() {
        let config = Config {
            show_line_numbers: true,
            ..Config::default()
        };
        let display = Display::new(&config);
        assert_eq!(display.line_number_width(5), 4);
        assert_eq!(display.line_number_width(12345), 6);

        let display = Display::new(&Config::default());
        assert_eq!(display.line_number_width(12345), 0);
    }
}
