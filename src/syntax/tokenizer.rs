//! Whole-document tokenizer
//!
//! Holds the ordered rule list. Rule order is precedence: earlier rules win
//! when two categories match the same region.

use tracing::debug;

use super::reconcile::reconcile;
use super::rules::PatternRule;
use super::tokens::{Category, MatchSpan};

/// Reserved words highlighted as keywords
pub const KEYWORDS: [&str; 8] = ["function", "if", "else", "for", "while", "var", "const", "let"];

/// An ordered set of pattern rules
pub struct Tokenizer {
    /// Rules, highest priority first
    rules: Vec<PatternRule>,
}

impl Tokenizer {
    /// Create a tokenizer with no rules
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create the built-in tokenizer (comment, string, number, keyword)
    pub fn builtin() -> Result<Self, regex::Error> {
        let mut tokenizer = Self::new();

        // Line comments stop before the line ending, block comments may span lines
        tokenizer.add_rule(PatternRule::new(
            "comment",
            r"//[^\r\n]*|(?s:/\*.*?\*/)",
            Category::Comment,
        )?);

        // A backslash escapes any following char, newlines included
        tokenizer.add_rule(PatternRule::new(
            "string",
            r#"'(?:\\(?s:.)|[^\\'])*'|"(?:\\(?s:.)|[^\\"])*""#,
            Category::String,
        )?);

        tokenizer.add_rule(PatternRule::new(
            "number",
            r"(?-u:\b)[0-9]+(?-u:\b)",
            Category::Number,
        )?);

        let keywords = format!(r"(?-u:\b)(?:{})(?-u:\b)", KEYWORDS.join("|"));
        tokenizer.add_rule(PatternRule::new("keyword", &keywords, Category::Keyword)?);

        Ok(tokenizer)
    }

    /// Append a rule with lower priority than every existing rule
    pub fn add_rule(&mut self, rule: PatternRule) {
        self.rules.push(rule);
    }

    /// Scan the whole text with every rule
    ///
    /// Returns one raw match list per rule, in priority order. Lists from
    /// different rules may overlap each other.
    pub fn scan(&self, text: &str) -> Vec<Vec<MatchSpan>> {
        self.rules
            .iter()
            .map(|rule| {
                let matches = rule.find_all(text);
                debug!(rule = %rule.name, count = matches.len(), "scanned");
                matches
            })
            .collect()
    }

    /// Scan and reconcile into a non-overlapping, start-ordered span set
    pub fn tokenize(&self, text: &str) -> Vec<MatchSpan> {
        reconcile(text.len(), self.scan(text))
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}
