//! Viewport - the visible window onto the document lines

/// Vertical scroll state of the text area
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    /// First visible line
    top_line: usize,
    /// Number of text rows
    height: usize,
}

impl Viewport {
    /// Create a viewport showing `height` rows from the top
    pub fn new(height: usize) -> Self {
        Self { top_line: 0, height }
    }

    /// Get the top visible line
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Get the number of text rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Set the number of text rows (after a resize)
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
    }

    /// Scroll just enough to show `line`
    pub fn ensure_visible(&mut self, line: usize) {
        if self.height == 0 {
            self.top_line = line;
        } else if line < self.top_line {
            self.top_line = line;
        } else if line >= self.top_line + self.height {
            self.top_line = line + 1 - self.height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrolls_down_and_up() {
        let mut viewport = Viewport::new(3);
        viewport.ensure_visible(2);
        assert_eq!(viewport.top_line(), 0);

        viewport.ensure_visible(5);
        assert_eq!(viewport.top_line(), 3);

        viewport.ensure_visible(1);
        assert_eq!(viewport.top_line(), 1);
    }

    #[test]
    fn test_resize_keeps_cursor_visible() {
        let mut viewport = Viewport::new(10);
        viewport.ensure_visible(9);
        viewport.set_height(4);
        viewport.ensure_visible(9);
        assert_eq!(viewport.top_line(), 6);
    }

    #[test]
    fn test_zero_height() {
        let mut viewport = Viewport::new(0);
        viewport.ensure_visible(7);
        assert_eq!(viewport.top_line(), 7);
    }
}
