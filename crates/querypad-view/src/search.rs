//! Whole-document literal search.
//!
//! [`SearchIndex::build`] scans every line in order and records each
//! non-overlapping occurrence of the query as a [`MatchRecord`]. The scan is
//! eager and covers the entire document regardless of which window is
//! materialized, so navigation can jump anywhere.
//!
//! Query characters are always literal. Case-insensitive matching folds both
//! sides with Unicode lowercase mapping; match bounds are reported against
//! the original (unfolded) line.

use std::ops::Range;

use crate::config::SearchConfig;

/// One located occurrence of the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// Line the match lies on.
    pub line_index: usize,
    /// First matched character (Unicode scalar offset within the line).
    pub start_col: usize,
    /// One past the last matched character.
    pub end_col: usize,
    /// Byte span of the match within the line.
    pub byte_range: Range<usize>,
    /// The line text covered by the match, in its original case.
    pub matched_text: String,
    /// Position of this match in document order, starting at 0.
    pub global_index: usize,
}

/// Immutable result of one search over a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    query: String,
    config: SearchConfig,
    matches: Vec<MatchRecord>,
}

impl SearchIndex {
    /// Build the index of all matches, top to bottom and left to right.
    ///
    /// An empty query produces an empty index.
    #[must_use]
    pub fn build<'a>(
        lines: impl IntoIterator<Item = &'a str>,
        query: &str,
        config: SearchConfig,
    ) -> Self {
        let mut index = Self {
            query: query.to_owned(),
            config,
            matches: Vec::new(),
        };
        if query.is_empty() {
            return index;
        }

        let needle = if config.case_sensitive {
            query.to_owned()
        } else {
            fold_case(query)
        };

        for (line_index, line) in lines.into_iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let ranges = if config.case_sensitive {
                line.match_indices(needle.as_str())
                    .map(|(start, m)| start..start + m.len())
                    .collect()
            } else {
                find_folded(line, &needle)
            };
            if ranges.is_empty() {
                continue;
            }
            push_line_matches(line_index, line, ranges, &mut index.matches);
        }

        index
    }

    /// The query this index was built for, as typed.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Total match count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// All matches in document order; `matches()[i].global_index == i`.
    #[must_use]
    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    #[must_use]
    pub fn get(&self, global_index: usize) -> Option<&MatchRecord> {
        self.matches.get(global_index)
    }

    /// Matches on one line, in column order.
    ///
    /// Binary search over the ordered match list, so the highlight pass over a
    /// window never touches matches outside it.
    #[must_use]
    pub fn matches_on_line(&self, line_index: usize) -> &[MatchRecord] {
        let lo = self.matches.partition_point(|m| m.line_index < line_index);
        let hi = lo + self.matches[lo..].partition_point(|m| m.line_index == line_index);
        &self.matches[lo..hi]
    }
}

/// Per-character lowercase fold. Applied identically to query and lines so
/// context-sensitive mappings cannot make them disagree.
fn fold_case(input: &str) -> String {
    input.chars().flat_map(fold_char).collect()
}

/// Lowercase `ch`, mapping final sigma onto medial sigma. `Σ` lowercases to
/// `σ` out of context, so `ς` has to land there too.
fn fold_char(ch: char) -> impl Iterator<Item = char> {
    ch.to_lowercase().map(|c| if c == 'ς' { 'σ' } else { c })
}

/// Case-insensitive byte ranges of `needle` (already folded) within `line`.
fn find_folded(line: &str, needle: &str) -> Vec<Range<usize>> {
    if line.is_ascii() && needle.is_ascii() {
        if needle.len() > line.len() {
            return Vec::new();
        }
        // ASCII lowercase preserves byte offsets.
        return line
            .to_ascii_lowercase()
            .match_indices(needle)
            .map(|(start, m)| start..start + m.len())
            .collect();
    }

    // `origins[b]` is the byte span of the original character that produced
    // folded byte `b`.
    let mut folded = String::with_capacity(line.len());
    let mut origins: Vec<(usize, usize)> = Vec::with_capacity(line.len());
    for (start, ch) in line.char_indices() {
        let end = start + ch.len_utf8();
        for lower in fold_char(ch) {
            folded.push(lower);
            origins.extend(std::iter::repeat_n((start, end), lower.len_utf8()));
        }
    }

    let mut ranges: Vec<Range<usize>> = Vec::new();
    for (start, m) in folded.match_indices(needle) {
        let orig_start = origins[start].0;
        let orig_end = origins[start + m.len() - 1].1;
        // Two folded hits inside one expanded character collapse to one.
        if ranges.last().is_some_and(|prev| orig_start < prev.end) {
            continue;
        }
        ranges.push(orig_start..orig_end);
    }
    ranges
}

fn push_line_matches(
    line_index: usize,
    line: &str,
    ranges: Vec<Range<usize>>,
    out: &mut Vec<MatchRecord>,
) {
    let char_starts: Option<Vec<usize>> = if line.is_ascii() {
        None
    } else {
        let mut starts: Vec<usize> = line.char_indices().map(|(idx, _)| idx).collect();
        starts.push(line.len());
        Some(starts)
    };
    let col = |byte: usize| match &char_starts {
        None => byte,
        Some(starts) => byte_offset_to_char_index(starts, byte),
    };

    for range in ranges {
        let global_index = out.len();
        out.push(MatchRecord {
            line_index,
            start_col: col(range.start),
            end_col: col(range.end),
            matched_text: line[range.clone()].to_owned(),
            byte_range: range,
            global_index,
        });
    }
}

fn byte_offset_to_char_index(char_starts: &[usize], byte_offset: usize) -> usize {
    match char_starts.binary_search(&byte_offset) {
        Ok(idx) | Err(idx) => idx,
    }
}
