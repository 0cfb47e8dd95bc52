//! Leaf view of the document
//!
//! The view is what a highlight pass produces: an ordered list of runs, each
//! either plain text or text labeled with a category. Flattening the runs in
//! order gives back the document text. Positions inside the view are
//! `ViewPoint`s (leaf index plus char offset); logical positions are char
//! offsets over the flattened text.

use crate::syntax::{Category, MatchSpan};

/// One text-bearing leaf of the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Highlight class, `None` for plain text
    pub class: Option<Category>,
    /// Text of this leaf
    pub text: String,
}

impl Run {
    /// Create a plain run
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            class: None,
            text: text.into(),
        }
    }

    /// Create a run labeled with a category
    pub fn labeled(category: Category, text: impl Into<String>) -> Self {
        Self {
            class: Some(category),
            text: text.into(),
        }
    }

    /// Length in chars
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A position inside the view: leaf index and char offset within that leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewPoint {
    pub leaf: usize,
    pub offset: usize,
}

impl ViewPoint {
    pub fn new(leaf: usize, offset: usize) -> Self {
        Self { leaf, offset }
    }
}

/// A piece of one display line carrying a single class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Highlight class of the run this piece came from
    pub class: Option<Category>,
    /// Text, never containing a newline
    pub text: String,
    /// Logical char offset of the first char
    pub start: usize,
}

/// The view: runs in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    runs: Vec<Run>,
}

impl View {
    /// Create an empty view
    pub fn new() -> Self {
        Self { runs: Vec::new() }
    }

    /// Create an unhighlighted view holding `text` as one plain run
    #[cfg(test)]
    pub fn plain(text: &str) -> Self {
        let mut view = Self::new();
        if !text.is_empty() {
            view.runs.push(Run::plain(text));
        }
        view
    }

    /// Get the runs in document order
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Flatten the view back to plain text
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Total length in chars
    pub fn char_len(&self) -> usize {
        self.runs.iter().map(Run::char_len).sum()
    }

    /// Convert a view point to a logical char offset
    ///
    /// Points past the last leaf, or past the end of their leaf, clamp.
    pub fn offset_of(&self, point: ViewPoint) -> usize {
        let Some(run) = self.runs.get(point.leaf) else {
            return self.char_len();
        };
        let before: usize = self.runs[..point.leaf].iter().map(Run::char_len).sum();
        before + point.offset.min(run.char_len())
    }

    /// Convert a logical char offset to a view point
    ///
    /// An offset on the boundary between two leaves resolves to the end of
    /// the earlier leaf. Offsets past the end clamp to the end of the last
    /// leaf; an empty view has the single point `{0, 0}`.
    pub fn point_at(&self, offset: usize) -> ViewPoint {
        let mut counter = 0;
        for (leaf, run) in self.runs.iter().enumerate() {
            let next = counter + run.char_len();
            if offset <= next {
                return ViewPoint::new(leaf, offset - counter);
            }
            counter = next;
        }

        match self.runs.last() {
            Some(run) => ViewPoint::new(self.runs.len() - 1, run.char_len()),
            None => ViewPoint::default(),
        }
    }

    /// Replace the chars in `[start, end)` with `replacement`, in place
    ///
    /// Works like a native edit on the leaves: the leaf holding `start` takes
    /// the new text and absorbs the rest of the edited range, so the view is
    /// left unhighlighted around the edit until the next pass. Returns the
    /// point right after the inserted text.
    pub fn splice(&mut self, start: usize, end: usize, replacement: &str) -> ViewPoint {
        if self.runs.is_empty() {
            self.runs.push(Run::plain(""));
        }

        let total = self.char_len();
        let start = start.min(total);
        let end = end.clamp(start, total);

        let first = self.point_at(start);
        let last = self.point_at(end);

        let first_text = &self.runs[first.leaf].text;
        let last_text = &self.runs[last.leaf].text;
        let mut edited = String::with_capacity(first_text.len() + replacement.len());
        edited.push_str(&first_text[..byte_index(first_text, first.offset)]);
        edited.push_str(replacement);
        edited.push_str(&last_text[byte_index(last_text, last.offset)..]);

        self.runs[first.leaf].text = edited;
        if last.leaf > first.leaf {
            self.runs.drain(first.leaf + 1..=last.leaf);
        }

        ViewPoint::new(first.leaf, first.offset + replacement.chars().count())
    }

    /// Split the view into display lines
    pub fn lines(&self) -> Vec<Vec<Segment>> {
        let mut lines = vec![Vec::new()];
        let mut offset = 0;

        for run in &self.runs {
            for (i, piece) in run.text.split('\n').enumerate() {
                if i > 0 {
                    // The newline itself occupies one char
                    offset += 1;
                    lines.push(Vec::new());
                }
                if !piece.is_empty() {
                    if let Some(line) = lines.last_mut() {
                        line.push(Segment {
                            class: run.class,
                            text: piece.to_string(),
                            start: offset,
                        });
                    }
                }
                offset += piece.chars().count();
            }
        }

        lines
    }
}

/// Build a fresh view from text and a reconciled span set
///
/// Gaps between spans become plain runs (empty gaps are skipped), each span
/// becomes a run labeled with its category.
pub fn render(text: &str, spans: &[MatchSpan]) -> View {
    let mut runs = Vec::with_capacity(spans.len() * 2 + 1);
    let mut index = 0;

    for span in spans {
        if span.start > index {
            runs.push(Run::plain(&text[index..span.start]));
        }
        runs.push(Run::labeled(span.category, span.text.as_str()));
        index = span.end;
    }

    if index < text.len() {
        runs.push(Run::plain(&text[index..]));
    }

    View { runs }
}

/// Byte index of the char at `char_offset`, or the text length past the end
fn byte_index(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(pos, _)| pos)
        .unwrap_or(text.len())
}
