//! The editable surface
//!
//! Owns the document's view and the live selection. Native edits (typing,
//! Backspace, Delete) change the leaves in place around the selection;
//! structural edits (Enter, Tab) do the same with computed text. Every
//! content change is followed by a synchronous highlight pass. Caret motion
//! only moves the selection.

use tracing::debug;

use crate::caret::{self, CaretRange, Selection};
use crate::config::{Config, EnterPolicy};
use crate::highlight::Highlighter;
use crate::syntax::MatchSpan;
use crate::view::{View, ViewPoint};

/// Caret movements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
}

/// Editable text surface
pub struct Surface {
    view: View,
    selection: Option<Selection>,
    spans: Vec<MatchSpan>,
    highlighter: Highlighter,
    /// Spaces inserted by Tab and after an opening brace
    indent_unit: String,
    enter_policy: EnterPolicy,
    /// Column kept across vertical motion
    goal_col: Option<usize>,
}

impl Surface {
    /// Create an empty surface with a caret at the start
    pub fn new(highlighter: Highlighter, config: &Config) -> Self {
        Self {
            view: View::new(),
            selection: Some(Selection::caret(ViewPoint::default())),
            spans: Vec::new(),
            highlighter,
            indent_unit: config.indent_unit(),
            enter_policy: config.enter_policy,
            goal_col: None,
        }
    }

    /// Replace the whole document, caret at the start
    #[cfg(test)]
    pub fn set_text(&mut self, text: &str) {
        self.view = View::plain(text);
        self.selection = Some(Selection::caret(ViewPoint::default()));
        self.goal_col = None;
        self.highlight();
    }

    /// Get the current view
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Get the live selection
    #[cfg(test)]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Get the document text
    #[cfg(test)]
    pub fn text(&self) -> String {
        self.view.text()
    }

    /// Spans from the last highlight pass
    pub fn spans(&self) -> &[MatchSpan] {
        &self.spans
    }

    /// Whether highlighting is on
    pub fn highlighting(&self) -> bool {
        self.highlighter.enabled
    }

    /// Turn highlighting on or off and re-render
    pub fn set_highlighting(&mut self, enabled: bool) {
        self.highlighter.enabled = enabled;
        self.highlight();
    }

    /// The selection as logical char offsets
    pub fn caret_range(&self) -> Option<CaretRange> {
        caret::save(&self.view, self.selection.as_ref())
    }

    /// Place the selection at logical offsets (clamped)
    #[cfg(test)]
    pub fn set_caret_range(&mut self, range: CaretRange) {
        self.selection = caret::restore(&self.view, Some(range));
        self.goal_col = None;
    }

    /// Drop the selection entirely
    #[cfg(test)]
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Line and char column of the caret
    pub fn caret_line_col(&self) -> Option<(usize, usize)> {
        let selection = self.selection.as_ref()?;
        let offset = self.view.offset_of(selection.focus);
        Some(line_col(&self.view.text(), offset))
    }

    /// Run the highlight pipeline over the current view
    pub fn highlight(&mut self) {
        let pass = self.highlighter.pass(&self.view, self.selection.as_ref());
        self.view = pass.view;
        self.selection = pass.selection;
        self.spans = pass.spans;
    }

    /// Insert text at the selection, replacing any selected text
    pub fn insert_text(&mut self, text: &str) {
        let Some(range) = self.caret_range() else {
            return;
        };
        self.replace(range.start, range.end, text);
        self.highlight();
    }

    /// Insert a single typed char
    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_text(ch.encode_utf8(&mut buf));
    }

    /// Delete the selection, or the char before the caret
    pub fn backspace(&mut self) {
        let Some(range) = self.caret_range() else {
            return;
        };
        if !range.is_collapsed() {
            self.replace(range.start, range.end, "");
        } else if range.start > 0 {
            self.replace(range.start - 1, range.start, "");
        } else {
            return;
        }
        self.highlight();
    }

    /// Delete the selection, or the char after the caret
    pub fn delete_forward(&mut self) {
        let Some(range) = self.caret_range() else {
            return;
        };
        if !range.is_collapsed() {
            self.replace(range.start, range.end, "");
        } else if range.start < self.view.char_len() {
            self.replace(range.start, range.start + 1, "");
        } else {
            return;
        }
        self.highlight();
    }

    /// Break the line with auto-indent and brace completion
    pub fn enter(&mut self) {
        let Some(range) = self.caret_range() else {
            return;
        };
        let text = self.view.text();
        let before = line_before(&text, range.start);
        let opens_block = before.ends_with('{');

        let caret = match self.enter_policy {
            EnterPolicy::CarryIndent => {
                let indent: String = before.chars().take_while(|c| c.is_whitespace()).collect();
                let mut head = format!("\n{indent}");
                let mut tail = String::new();
                if opens_block {
                    head.push_str(&self.indent_unit);
                    tail = format!("\n{indent}}}");
                }
                self.replace(range.start, range.end, &format!("{head}{tail}"));
                range.start + head.chars().count()
            }
            EnterPolicy::BraceOnly => {
                let head = if opens_block {
                    format!("\n{}", self.indent_unit)
                } else {
                    String::from("\n")
                };
                self.replace(range.start, range.end, &head);
                if opens_block {
                    let end = self.view.char_len();
                    self.view.splice(end, end, "\n}");
                }
                range.start + head.chars().count()
            }
        };

        debug!(policy = ?self.enter_policy, opens_block, caret, "enter");
        self.selection = caret::restore(&self.view, Some(CaretRange::collapsed(caret)));
        self.highlight();
    }

    /// Insert one indent unit of spaces at the selection start
    ///
    /// Selected text is kept; the caret lands after the inserted spaces.
    pub fn tab(&mut self) {
        let Some(range) = self.caret_range() else {
            return;
        };
        let unit = self.indent_unit.clone();
        self.replace(range.start, range.start, &unit);
        debug!(at = range.start, width = unit.len(), "tab");
        self.highlight();
    }

    /// Move the caret, optionally extending the selection
    pub fn move_caret(&mut self, motion: Motion, extend: bool) {
        let current = self
            .selection
            .unwrap_or_else(|| Selection::caret(ViewPoint::default()));
        let anchor = self.view.offset_of(current.anchor);
        let focus = self.view.offset_of(current.focus);
        let text = self.view.text();
        let len = self.view.char_len();
        let (line, col) = line_col(&text, focus);
        let collapse_edge = !extend && anchor != focus;

        let target = match motion {
            Motion::Left if collapse_edge => anchor.min(focus),
            Motion::Right if collapse_edge => anchor.max(focus),
            Motion::Left => focus.saturating_sub(1),
            Motion::Right => (focus + 1).min(len),
            Motion::Up | Motion::Down => {
                let goal = *self.goal_col.get_or_insert(col);
                let target_line = match motion {
                    Motion::Up if line > 0 => Some(line - 1),
                    Motion::Down if line + 1 < text.split('\n').count() => Some(line + 1),
                    _ => None,
                };
                match target_line {
                    Some(target_line) => offset_at(&text, target_line, goal),
                    None => focus,
                }
            }
            Motion::LineStart => focus - col,
            Motion::LineEnd => offset_at(&text, line, usize::MAX),
            Motion::DocumentStart => 0,
            Motion::DocumentEnd => len,
        };

        if !matches!(motion, Motion::Up | Motion::Down) {
            self.goal_col = None;
        }

        let focus_point = self.view.point_at(target);
        let anchor_point = if extend { current.anchor } else { focus_point };
        self.selection = Some(Selection {
            anchor: anchor_point,
            focus: focus_point,
        });
    }

    /// Native edit of the leaves; the caret collapses after the new text
    fn replace(&mut self, start: usize, end: usize, text: &str) {
        let point = self.view.splice(start, end, text);
        self.selection = Some(Selection::caret(point));
        self.goal_col = None;
    }
}

/// Text of the current line before a char offset
fn line_before(text: &str, offset: usize) -> &str {
    let end = text
        .char_indices()
        .nth(offset)
        .map(|(pos, _)| pos)
        .unwrap_or(text.len());
    let start = text[..end].rfind('\n').map(|pos| pos + 1).unwrap_or(0);
    &text[start..end]
}

/// Line index and char column of a char offset
pub fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let mut line = 0;
    let mut col = 0;
    for ch in text.chars().take(offset) {
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// Char offset of a line and column, with the column clamped to the line
fn offset_at(text: &str, line: usize, col: usize) -> usize {
    let mut offset = 0;
    for (idx, line_text) in text.split('\n').enumerate() {
        let line_len = line_text.chars().count();
        if idx == line {
            return offset + col.min(line_len);
        }
        offset += line_len + 1;
    }
    text.chars().count()
}
