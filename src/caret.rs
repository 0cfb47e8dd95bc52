//! Caret tracking across re-renders
//!
//! A highlight pass throws the view away and builds a new one, so a
//! selection expressed in view points would dangle. Before the pass the
//! selection is saved as logical char offsets; afterwards those offsets are
//! mapped back onto the new leaves. Re-rendering keeps the char count and
//! order intact, so the offsets stay valid.

use crate::view::{View, ViewPoint};

/// A live selection in view coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection started
    pub anchor: ViewPoint,
    /// Where the caret is
    pub focus: ViewPoint,
}

impl Selection {
    /// Collapsed selection (plain caret) at a point
    pub fn caret(point: ViewPoint) -> Self {
        Self {
            anchor: point,
            focus: point,
        }
    }

    /// The earlier and later point of the selection, by logical offset
    pub fn ordered(&self, view: &View) -> (ViewPoint, ViewPoint) {
        if view.offset_of(self.anchor) <= view.offset_of(self.focus) {
            (self.anchor, self.focus)
        } else {
            (self.focus, self.anchor)
        }
    }

    /// Check if both ends name the same logical offset
    #[cfg(test)]
    pub fn is_collapsed(&self, view: &View) -> bool {
        view.offset_of(self.anchor) == view.offset_of(self.focus)
    }
}

/// A selection as char offsets over the whole document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretRange {
    pub start: usize,
    pub end: usize,
}

impl CaretRange {
    pub fn collapsed(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Capture the selection as logical offsets, before the view is replaced
pub fn save(view: &View, selection: Option<&Selection>) -> Option<CaretRange> {
    let selection = selection?;
    let (first, last) = selection.ordered(view);
    let start = view.offset_of(first);
    let selected = view.offset_of(last) - start;
    Some(CaretRange {
        start,
        end: start + selected,
    })
}

/// Map saved offsets onto a freshly rendered view
///
/// Each end lands in the first leaf whose span of offsets contains it, so a
/// leaf boundary resolves to the end of the earlier leaf. Offsets past the
/// end of the view clamp to the end.
pub fn restore(view: &View, saved: Option<CaretRange>) -> Option<Selection> {
    let saved = saved?;
    let anchor = view.point_at(saved.start);
    let focus = if saved.is_collapsed() {
        anchor
    } else {
        view.point_at(saved.end.max(saved.start))
    };
    Some(Selection { anchor, focus })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Tokenizer;
    use crate::view::render;
    use proptest::prelude::*;

    fn highlighted(text: &str) -> View {
        let spans = Tokenizer::builtin().unwrap().tokenize(text);
        render(text, &spans)
    }

    #[test]
    fn test_no_selection() {
        let view = highlighted("let x = 1;");
        assert_eq!(save(&view, None), None);
        assert_eq!(restore(&view, None), None);
    }

    #[test]
    fn test_save_counts_preceding_chars() {
        let view = highlighted("let x = 1;");
        // Caret inside the " x = " leaf, after "x"
        let selection = Selection::caret(ViewPoint::new(1, 2));
        assert_eq!(save(&view, Some(&selection)), Some(CaretRange::collapsed(5)));
    }

    #[test]
    fn test_save_backward_selection() {
        let view = highlighted("let x = 1;");
        let selection = Selection {
            anchor: ViewPoint::new(2, 1),
            focus: ViewPoint::new(0, 1),
        };
        assert_eq!(save(&view, Some(&selection)), Some(CaretRange { start: 1, end: 9 }));
    }

    #[test]
    fn test_restore_boundary_uses_earlier_leaf() {
        let view = highlighted("let x");
        let restored = restore(&view, Some(CaretRange::collapsed(3))).unwrap();
        assert_eq!(restored.anchor, ViewPoint::new(0, 3));
        assert_eq!(restored.focus, ViewPoint::new(0, 3));
    }

    #[test]
    fn test_restore_range_across_leaves() {
        let view = highlighted("if 42 else");
        let restored = restore(&view, Some(CaretRange { start: 1, end: 7 })).unwrap();
        assert_eq!(restored.anchor, ViewPoint::new(0, 1));
        // "if", " ", "42", " ", "else": offset 7 is inside "else"
        assert_eq!(restored.focus, ViewPoint::new(4, 1));
    }

    #[test]
    fn test_restore_clamps_past_end() {
        let view = highlighted("abc");
        let restored = restore(&view, Some(CaretRange { start: 2, end: 40 })).unwrap();
        assert_eq!(restored.anchor, ViewPoint::new(0, 2));
        assert_eq!(restored.focus, ViewPoint::new(0, 3));

        let restored = restore(&view, Some(CaretRange::collapsed(40))).unwrap();
        assert!(restored.is_collapsed(&view));
        assert_eq!(view.offset_of(restored.focus), 3);
    }

    #[test]
    fn test_restore_into_empty_view() {
        let view = View::new();
        let restored = restore(&view, Some(CaretRange::collapsed(4))).unwrap();
        assert_eq!(restored, Selection::caret(ViewPoint::default()));
    }

    #[test]
    fn test_survives_rerender() {
        let before = View::plain("var s = 'a'; // c");
        let selection = Selection {
            anchor: ViewPoint::new(0, 4),
            focus: ViewPoint::new(0, 11),
        };
        let saved = save(&before, Some(&selection));

        let after = highlighted("var s = 'a'; // c");
        let restored = restore(&after, saved).unwrap();
        assert_eq!(after.offset_of(restored.anchor), 4);
        assert_eq!(after.offset_of(restored.focus), 11);
    }

    proptest! {
        #[test]
        fn collapsed_caret_round_trip(text in r#"[a-z0-9 '"/*{}\né]{0,60}"#, k in 0usize..70) {
            let plain = View::plain(&text);
            let k = k.min(plain.char_len());
            let saved = save(&plain, Some(&Selection::caret(plain.point_at(k))));
            prop_assert_eq!(saved, Some(CaretRange::collapsed(k)));

            let view = highlighted(&text);
            let restored = restore(&view, saved).unwrap();
            prop_assert!(restored.is_collapsed(&view));
            prop_assert_eq!(view.offset_of(restored.focus), k);
        }
    }
}
