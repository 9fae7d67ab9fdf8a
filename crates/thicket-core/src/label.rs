//! Node label formatting.
//!
//! A label is the node title, optionally followed by a line break and the
//! body text wrapped to a fixed character budget. Wrapping counts characters,
//! not rendered pixels, and never splits a word.

/// Default character budget of one wrapped body line.
pub const DEFAULT_WRAP_WIDTH: usize = 15;

/// Formats titles and bodies into display labels.
///
/// # Examples
///
/// ```
/// use thicket_core::label::LabelFormatter;
///
/// let formatter = LabelFormatter::default();
/// assert_eq!(formatter.format("Title", ""), "Title");
/// assert_eq!(
///     formatter.format("Title", "a body that needs wrapping"),
///     "Title\na body that\nneeds wrapping"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelFormatter {
    wrap_width: usize,
}

impl Default for LabelFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_WRAP_WIDTH)
    }
}

impl LabelFormatter {
    /// Creates a formatter wrapping body lines at `wrap_width` characters.
    pub fn new(wrap_width: usize) -> Self {
        Self { wrap_width }
    }

    /// Returns the character budget per body line.
    pub fn wrap_width(&self) -> usize {
        self.wrap_width
    }

    /// Builds the label for a node.
    ///
    /// A body without any words yields the title alone, with no trailing
    /// line break.
    pub fn format(&self, title: &str, body: &str) -> String {
        let lines = self.wrap(body);
        if lines.is_empty() {
            return title.to_string();
        }

        let mut label = String::with_capacity(title.len() + body.len() + lines.len());
        label.push_str(title);
        for line in &lines {
            label.push('\n');
            label.push_str(line);
        }
        label
    }

    /// Greedily packs the whitespace-separated words of `body` into lines.
    ///
    /// A line grows while its length, with single spaces between words,
    /// stays within the wrap width. A word longer than the width gets a line
    /// of its own.
    pub fn wrap(&self, body: &str) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for word in body.split_whitespace() {
            let word_len = word.chars().count();

            if current.is_empty() {
                current.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len > self.wrap_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_len = word_len;
            } else {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}
