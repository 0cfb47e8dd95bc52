//! The highlight pass
//!
//! Composes the pipeline: save caret, flatten the view, tokenize, reconcile,
//! render and restore the caret onto the new view.

use tracing::debug;

use crate::caret::{self, Selection};
use crate::error::Result;
use crate::syntax::{MatchSpan, Tokenizer};
use crate::view::{render, View};

/// Result of one highlight pass
#[derive(Debug)]
pub struct Pass {
    /// The freshly built view
    pub view: View,
    /// The selection mapped onto `view`
    pub selection: Option<Selection>,
    /// Spans the view was built from
    pub spans: Vec<MatchSpan>,
}

/// Highlight pipeline controller
pub struct Highlighter {
    tokenizer: Tokenizer,
    /// Whether highlighting is enabled
    pub enabled: bool,
}

impl Highlighter {
    /// Create a highlighter with the built-in rules
    pub fn new() -> Result<Self> {
        Ok(Self::with_tokenizer(Tokenizer::builtin()?))
    }

    /// Create a highlighter around a custom tokenizer
    pub fn with_tokenizer(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            enabled: true,
        }
    }

    /// Get the reconciled spans for a text
    pub fn spans(&self, text: &str) -> Vec<MatchSpan> {
        if self.enabled {
            self.tokenizer.tokenize(text)
        } else {
            Vec::new()
        }
    }

    /// Run a full pass over the current view
    ///
    /// The view is flattened on every call; it may have just been edited in
    /// place and is the only source of truth for the text.
    pub fn pass(&self, view: &View, selection: Option<&Selection>) -> Pass {
        let saved = caret::save(view, selection);
        let text = view.text();
        let spans = self.spans(&text);
        let view = render(&text, &spans);
        let selection = caret::restore(&view, saved);

        debug!(
            bytes = text.len(),
            spans = spans.len(),
            runs = view.runs().len(),
            caret = ?saved,
            "highlight pass"
        );

        Pass {
            view,
            selection,
            spans,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Category;
    use crate::view::{Run, ViewPoint};
    use std::sync::Once;

    fn setup_test_logging() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_max_level(tracing::Level::DEBUG)
                .with_test_writer()
                .try_init();
        });
    }

    #[test]
    fn test_pass_highlights_and_keeps_caret() {
        setup_test_logging();
        let highlighter = Highlighter::new().unwrap();
        let view = View::plain("let x = 10;");
        let selection = Selection::caret(ViewPoint::new(0, 9));

        let pass = highlighter.pass(&view, Some(&selection));
        assert_eq!(pass.view.text(), "let x = 10;");
        assert_eq!(pass.spans.len(), 2);
        assert_eq!(pass.view.runs()[0], Run::labeled(Category::Keyword, "let"));

        let restored = pass.selection.unwrap();
        assert_eq!(restored.focus, ViewPoint::new(2, 1));
        assert_eq!(pass.view.offset_of(restored.focus), 9);
    }

    #[test]
    fn test_pass_is_idempotent() {
        setup_test_logging();
        let highlighter = Highlighter::new().unwrap();
        let view = View::plain("if (a) { /* b */ return 'c'; }");

        let first = highlighter.pass(&view, None);
        let second = highlighter.pass(&first.view, None);
        assert_eq!(first.spans, second.spans);
        assert_eq!(first.view, second.view);
        assert!(second.selection.is_none());
    }

    #[test]
    fn test_disabled_renders_plain() {
        let mut highlighter = Highlighter::new().unwrap();
        highlighter.enabled = false;
        let view = View::plain("const n = 1;");

        let pass = highlighter.pass(&view, Some(&Selection::caret(ViewPoint::new(0, 3))));
        assert!(pass.spans.is_empty());
        assert_eq!(pass.view.runs(), [Run::plain("const n = 1;")]);
        assert_eq!(pass.selection, Some(Selection::caret(ViewPoint::new(0, 3))));
    }

    #[test]
    fn test_pass_on_empty_document() {
        let highlighter = Highlighter::new().unwrap();
        let pass = highlighter.pass(&View::new(), Some(&Selection::caret(ViewPoint::default())));
        assert!(pass.view.runs().is_empty());
        assert_eq!(pass.selection, Some(Selection::caret(ViewPoint::default())));
    }
}
