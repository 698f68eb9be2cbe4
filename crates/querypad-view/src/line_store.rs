//! Line storage and render mode selection.

/// Rendering strategy for the current document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Materialize every line at once.
    Direct,
    /// Materialize a sliding window around the viewport.
    Windowed,
}

impl RenderMode {
    /// `Windowed` iff `total_lines >= activation_threshold`.
    #[must_use]
    pub fn select(total_lines: usize, activation_threshold: usize) -> Self {
        if total_lines >= activation_threshold {
            Self::Windowed
        } else {
            Self::Direct
        }
    }

    #[must_use]
    pub fn is_windowed(self) -> bool {
        self == Self::Windowed
    }
}

/// The text being displayed, one entry per `\n`-separated line.
///
/// A store is never edited in place: each new result replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStore {
    lines: Vec<String>,
}

impl LineStore {
    /// Split `text` on `\n`, keeping empty leading and trailing lines.
    ///
    /// The empty string yields an empty store rather than a single empty
    /// line, so an empty result renders nothing.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self {
            lines: text.split('\n').map(str::to_owned).collect(),
        }
    }

    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Iterate lines in order as `&str`.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// All lines rejoined with `\n`.
    #[must_use]
    pub fn full_text(&self) -> String {
        self.lines.join("\n")
    }
}
