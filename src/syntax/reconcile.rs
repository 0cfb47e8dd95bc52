//! Span reconciliation
//!
//! Merges the per-rule match lists into one non-overlapping list. Rules are
//! visited in priority order and the first rule to claim a byte keeps it.

use super::tokens::MatchSpan;

/// Merge raw per-rule matches into a reconciled span set
///
/// `matches` holds one list per rule, highest priority first. A candidate is
/// accepted only if none of its bytes is already claimed. The result is
/// sorted by start offset.
pub fn reconcile(text_len: usize, matches: Vec<Vec<MatchSpan>>) -> Vec<MatchSpan> {
    let mut claimed = vec![false; text_len];
    let mut accepted = Vec::new();

    for rule_matches in matches {
        for span in rule_matches {
            if span.is_empty() || span.end > text_len {
                continue;
            }
            let region = &mut claimed[span.start..span.end];
            if region.iter().any(|&taken| taken) {
                continue;
            }
            region.fill(true);
            accepted.push(span);
        }
    }

    // Equal starts would share a claimed byte, so the order is total
    accepted.sort_by_key(|span| span.start);
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokens::Category;

    fn span(text: &str, start: usize, end: usize, category: Category) -> MatchSpan {
        MatchSpan::new(text, start, end, category)
    }

    #[test]
    fn test_first_rule_wins() {
        let text = "// let x = 5";
        let comments = vec![span(text, 0, 12, Category::Comment)];
        let numbers = vec![span(text, 11, 12, Category::Number)];
        let keywords = vec![span(text, 3, 6, Category::Keyword)];

        let result = reconcile(text.len(), vec![comments, numbers, keywords]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, Category::Comment);
    }

    #[test]
    fn test_partial_overlap_rejected() {
        let text = "abcdefgh";
        let first = vec![span(text, 2, 5, Category::String)];
        // Starts before and ends inside the accepted span
        let second = vec![span(text, 0, 3, Category::Number), span(text, 5, 8, Category::Number)];

        let result = reconcile(text.len(), vec![first, second]);
        let ranges: Vec<_> = result.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(ranges, [(2, 5), (5, 8)]);
    }

    #[test]
    fn test_later_rule_cannot_split() {
        let text = "'while'";
        let strings = vec![span(text, 0, 7, Category::String)];
        let keywords = vec![span(text, 1, 6, Category::Keyword)];

        let result = reconcile(text.len(), vec![strings, keywords]);
        assert_eq!(result, vec![span(text, 0, 7, Category::String)]);
    }

    #[test]
    fn test_sorted_by_start() {
        let text = "if 1 else 2";
        let numbers = vec![span(text, 3, 4, Category::Number), span(text, 10, 11, Category::Number)];
        let keywords = vec![span(text, 0, 2, Category::Keyword), span(text, 5, 9, Category::Keyword)];

        let result = reconcile(text.len(), vec![numbers, keywords]);
        let starts: Vec<_> = result.iter().map(|s| s.start).collect();
        assert_eq!(starts, [0, 3, 5, 10]);
    }

    #[test]
    fn test_out_of_bounds_dropped() {
        let text = "abc";
        let bogus = MatchSpan {
            start: 1,
            end: 9,
            category: Category::Comment,
            text: String::from("bc"),
        };
        let empty = MatchSpan {
            start: 2,
            end: 2,
            category: Category::Comment,
            text: String::new(),
        };
        assert!(reconcile(text.len(), vec![vec![bogus, empty]]).is_empty());
    }
}
