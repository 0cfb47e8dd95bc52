//! Pattern rules for syntax highlighting
//!
//! A rule pairs a compiled regex with the category it assigns. Rules scan
//! the whole document at once; there is no per-line state.

use regex::Regex;

use super::tokens::{Category, MatchSpan};

/// A single pattern rule
pub struct PatternRule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Category to assign to matches
    pub category: Category,
}

impl PatternRule {
    /// Create a new pattern rule
    pub fn new(name: &str, pattern: &str, category: Category) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.to_string(),
            pattern: Regex::new(pattern)?,
            category,
        })
    }

    /// Find the first match in text starting at byte position
    ///
    /// Word boundaries still see the text before `start`.
    pub fn find_at(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        if start > text.len() {
            return None;
        }
        self.pattern.find_at(text, start).map(|m| (m.start(), m.end()))
    }

    /// Find every non-overlapping, non-empty match in the text
    pub fn find_all(&self, text: &str) -> Vec<MatchSpan> {
        let mut spans = Vec::new();
        let mut pos = 0;

        while let Some((start, end)) = self.find_at(text, pos) {
            if end > start {
                spans.push(MatchSpan::new(text, start, end, self.category));
                pos = end;
                continue;
            }

            // Zero-width match: step over one char so the scan always advances
            match text[start..].chars().next() {
                Some(ch) => pos = start + ch.len_utf8(),
                None => break,
            }
        }

        spans
    }
}
