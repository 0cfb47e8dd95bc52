//! Highlight categories and match spans
//!
//! A category is the label a pattern rule attaches to its matches. Each one
//! maps to a class name and a default visual style.

use super::style::{Color, Style};

/// Semantic categories recognized by the highlighter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Line (`//`) and block (`/* */`) comments
    Comment,
    /// Single or double quoted strings
    String,
    /// Runs of ASCII digits
    Number,
    /// Reserved words
    Keyword,
}

impl Category {
    /// All categories in highlight priority order
    pub const ALL: [Category; 4] = [
        Category::Comment,
        Category::String,
        Category::Number,
        Category::Keyword,
    ];

    /// Get the default style for this category
    pub fn default_style(&self) -> Style {
        match self {
            Category::Comment => Style::fg(Color::BrightBlack).with_italic(),
            Category::String => Style::fg(Color::Green),
            Category::Number => Style::fg(Color::Cyan),
            Category::Keyword => Style::fg(Color::Magenta).with_bold(),
        }
    }

    /// Get the class name (also the key used in the config `[colors]` table)
    pub fn class_name(&self) -> &'static str {
        match self {
            Category::Comment => "comment",
            Category::String => "string",
            Category::Number => "number",
            Category::Keyword => "keyword",
        }
    }

    /// Parse a category from its class name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.class_name() == name)
    }
}

/// A labeled region of the document found by one pattern rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSpan {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Category of the rule that produced it
    pub category: Category,
    /// The matched text
    pub text: String,
}

impl MatchSpan {
    /// Create a span over `text[start..end]`
    pub fn new(text: &str, start: usize, end: usize, category: Category) -> Self {
        Self {
            start,
            end,
            category,
            text: text[start..end].to_string(),
        }
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
