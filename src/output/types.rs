//! Core data types for styled output.

use par_trace_config::Style;

/// A segment of styled text within a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment {
    /// The text content.
    pub text: String,
    pub style: Style,
}

/// A single line of styled output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledLine {
    /// The styled segments making up this line.
    pub segments: Vec<StyledSegment>,
}

impl StyledLine {
    /// An empty line.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Creates a plain unstyled line from text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Style::PLAIN)
    }

    /// Creates a line holding a single styled segment.
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        let mut line = Self::default();
        line.push(text, style);
        line
    }

    /// Append a segment. Empty text is dropped.
    pub fn push(&mut self, text: impl Into<String>, style: Style) {
        let text = text.into();
        if !text.is_empty() {
            self.segments.push(StyledSegment { text, style });
        }
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, text: impl Into<String>, style: Style) -> Self {
        self.push(text, style);
        self
    }

    /// Append every segment of `other`.
    pub fn extend(&mut self, other: StyledLine) {
        self.segments.extend(other.segments);
    }

    /// The line's text with all styling removed.
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// The line in inline markup form: `<fg=red;options=bold>text</>`.
    ///
    /// Unstyled segments are emitted bare. A literal `<` is escaped as `\<`
    /// so markup consumers do not mistake it for a tag.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            let text = segment.text.replace('<', "\\<");
            if segment.style.is_plain() {
                out.push_str(&text);
            } else {
                out.push_str(&format!("<{}>{}</>", segment.style, text));
            }
        }
        out
    }
}
