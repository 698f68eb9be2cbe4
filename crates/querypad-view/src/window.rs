//! Viewport window calculation.
//!
//! Translates a pixel scroll offset and viewport height into the half-open
//! range of lines to materialize. The range covers the visible lines plus
//! `buffer_lines` on each side, clamped to the document. [`WindowState`]
//! remembers the last materialized range so that a scroll event which lands
//! on the same range costs nothing.

use std::ops::Range;

/// Half-open range of line indexes, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted line range {start}..{end}");
        Self { start, end }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line < self.end
    }

    #[must_use]
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Convert a pixel quantity to whole lines, treating negative and non-finite
/// input as zero.
fn px_to_lines(px: f64, line_height_px: f64, round_up: bool) -> usize {
    if !px.is_finite() || px <= 0.0 || line_height_px <= 0.0 {
        return 0;
    }
    let lines = px / line_height_px;
    let lines = if round_up { lines.ceil() } else { lines.floor() };
    // Saturating float-to-int cast.
    lines as usize
}

/// Compute the window for a scroll position.
///
/// ```text
/// start = max(0, floor(scroll / line_h) - buffer)
/// end   = min(total, start + ceil(viewport / line_h) + 2 * buffer)
/// ```
///
/// The visible count ignores the fractional line at the top, so a viewport
/// scrolled mid-line shows one line past `start + visible`. Any
/// `buffer >= 1` covers it; with `buffer == 0` that last line is left out.
#[must_use]
pub fn compute_window(
    scroll_offset_px: f64,
    viewport_height_px: f64,
    line_height_px: f64,
    buffer_lines: usize,
    total_lines: usize,
) -> LineRange {
    let raw_start = px_to_lines(scroll_offset_px, line_height_px, false);
    let visible = px_to_lines(viewport_height_px, line_height_px, true);

    let start = raw_start.saturating_sub(buffer_lines).min(total_lines);
    let end = start
        .saturating_add(visible)
        .saturating_add(buffer_lines.saturating_mul(2))
        .min(total_lines);

    LineRange::new(start, end)
}

/// Every line with at least one pixel on screen, clamped to the document.
#[must_use]
pub fn visible_range(
    scroll_offset_px: f64,
    viewport_height_px: f64,
    line_height_px: f64,
    total_lines: usize,
) -> LineRange {
    let start = px_to_lines(scroll_offset_px, line_height_px, false).min(total_lines);
    let bottom = scroll_offset_px + viewport_height_px;
    let end = px_to_lines(bottom, line_height_px, true)
        .max(start)
        .min(total_lines);
    LineRange::new(start, end)
}

/// Last materialized window.
///
/// `None` is the stale sentinel: the next update always reports a change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowState {
    current: Option<LineRange>,
}

impl WindowState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<LineRange> {
        self.current
    }

    /// Store `range`; returns `false` when it equals the stored window.
    pub fn update(&mut self, range: LineRange) -> bool {
        if self.current == Some(range) {
            return false;
        }
        self.current = Some(range);
        true
    }

    /// Force the next [`update`](Self::update) to report a change.
    pub fn invalidate(&mut self) {
        self.current = None;
    }

}
