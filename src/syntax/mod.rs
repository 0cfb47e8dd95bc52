//! Syntax and styling module
//!
//! This module provides the highlighting front half:
//! - Pattern rules and the ordered whole-document tokenizer
//! - Span reconciliation (first claim wins)
//! - Categories and their terminal styles

mod reconcile;
mod rules;
mod style;
mod tokenizer;
mod tokens;

pub use style::{Color, Style};
pub use tokenizer::Tokenizer;
pub use tokens::{Category, MatchSpan};
