//! Materialized output: plain and highlighted lines for one window.
//!
//! A [`RenderedBlock`] holds exactly the lines of one [`LineRange`]; nothing
//! outside the range is represented. Lines without matches become a single
//! plain span. Lines with matches are split into plain text and match spans,
//! and the span whose global index equals the current match is marked
//! [`SpanKind::CurrentMatch`].
//!
//! Spans hold raw text. [`RenderedLine::to_html`] escapes it for embedding as
//! markup; only match boundaries introduce tags.

use std::borrow::Cow;
use std::fmt::Write as _;

use memchr::memchr3;

use crate::line_store::LineStore;
use crate::search::{MatchRecord, SearchIndex};
use crate::window::LineRange;

/// CSS class of every rendered line element.
pub const LINE_CLASS: &str = "qp-line";
/// CSS class of a match highlight.
pub const MATCH_CLASS: &str = "qp-match";
/// Additional CSS class of the current match.
pub const CURRENT_CLASS: &str = "qp-current";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Plain,
    Match,
    CurrentMatch,
}

/// A run of line text with one rendering role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub text: String,
}

impl Span {
    fn new(kind: SpanKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_owned(),
        }
    }
}

/// One materialized line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub index: usize,
    pub spans: Vec<Span>,
}

impl RenderedLine {
    /// Concatenated span text; equals the source line.
    #[must_use]
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[must_use]
    pub fn has_highlights(&self) -> bool {
        self.spans.iter().any(|s| s.kind != SpanKind::Plain)
    }

    /// Escaped inner markup of the line (no enclosing element).
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        for span in &self.spans {
            let text = escape_html(&span.text);
            match span.kind {
                SpanKind::Plain => out.push_str(&text),
                SpanKind::Match => {
                    let _ = write!(out, "<mark class=\"{MATCH_CLASS}\">{text}</mark>");
                }
                SpanKind::CurrentMatch => {
                    let _ = write!(
                        out,
                        "<mark class=\"{MATCH_CLASS} {CURRENT_CLASS}\">{text}</mark>"
                    );
                }
            }
        }
    }
}

/// The lines of one window, each occupying `line_height_px`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBlock {
    pub range: LineRange,
    pub line_height_px: f64,
    pub lines: Vec<RenderedLine>,
}

impl RenderedBlock {
    /// Materialize `range` of `store`, splicing in matches from `search`.
    ///
    /// `range` is clamped to the store.
    #[must_use]
    pub fn build(
        store: &LineStore,
        range: LineRange,
        search: Option<&SearchIndex>,
        current: Option<usize>,
        line_height_px: f64,
    ) -> Self {
        let end = range.end.min(store.len());
        let start = range.start.min(end);
        let range = LineRange::new(start, end);

        let lines = store.lines()[range.as_range()]
            .iter()
            .enumerate()
            .map(|(offset, text)| {
                let index = start + offset;
                let matches = search.map_or(&[][..], |idx| idx.matches_on_line(index));
                render_line(index, text, matches, current)
            })
            .collect();

        Self {
            range,
            line_height_px,
            lines,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of match spans (current included) in the block.
    #[must_use]
    pub fn highlight_count(&self) -> usize {
        self.lines
            .iter()
            .flat_map(|l| &l.spans)
            .filter(|s| s.kind != SpanKind::Plain)
            .count()
    }

    /// The line holding the current match, if it is inside this block.
    #[must_use]
    pub fn current_match_line(&self) -> Option<usize> {
        self.lines
            .iter()
            .find(|l| l.spans.iter().any(|s| s.kind == SpanKind::CurrentMatch))
            .map(|l| l.index)
    }

    /// Markup for the whole block: one fixed-height `div` per line.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(self.lines.len() * 48);
        for line in &self.lines {
            let _ = write!(
                out,
                "<div class=\"{LINE_CLASS}\" style=\"height:{}px\">",
                self.line_height_px
            );
            line.write_html(&mut out);
            out.push_str("</div>");
        }
        out
    }
}

/// Split one line into plain and match spans.
///
/// `matches` must belong to this line and be in column order.
#[must_use]
pub fn render_line(
    index: usize,
    text: &str,
    matches: &[MatchRecord],
    current: Option<usize>,
) -> RenderedLine {
    if matches.is_empty() {
        return RenderedLine {
            index,
            spans: vec![Span::new(SpanKind::Plain, text)],
        };
    }

    let mut spans = Vec::with_capacity(matches.len() * 2 + 1);
    let mut cursor = 0;
    for m in matches {
        debug_assert_eq!(m.line_index, index, "match from another line");
        let range = m.byte_range.clone();
        if range.start < cursor || range.end > text.len() {
            continue;
        }
        if range.start > cursor {
            spans.push(Span::new(SpanKind::Plain, &text[cursor..range.start]));
        }
        let kind = if current == Some(m.global_index) {
            SpanKind::CurrentMatch
        } else {
            SpanKind::Match
        };
        spans.push(Span::new(kind, &text[range.clone()]));
        cursor = range.end;
    }
    if cursor < text.len() {
        spans.push(Span::new(SpanKind::Plain, &text[cursor..]));
    }

    RenderedLine { index, spans }
}

/// Escape `&`, `<` and `>` for use as element text.
///
/// Returns the input borrowed when nothing needs escaping.
#[must_use]
pub fn escape_html(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    let Some(first) = memchr3(b'&', b'<', b'>', bytes) else {
        return Cow::Borrowed(input);
    };

    let mut out = String::with_capacity(input.len() + 16);
    out.push_str(&input[..first]);
    for ch in input[first..].chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
