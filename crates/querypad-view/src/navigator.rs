//! Current-match pointer with circular navigation.

/// Index of the current match, or none.
///
/// Never points past the match count it was last reset with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchCursor {
    current: Option<usize>,
    total: usize,
}

impl MatchCursor {
    /// Cursor for a fresh search: at the first match, or none when empty.
    #[must_use]
    pub fn for_total(total: usize) -> Self {
        Self {
            current: (total > 0).then_some(0),
            total,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Advance with wraparound. `None` when there are no matches.
    pub fn next(&mut self) -> Option<usize> {
        if self.total == 0 {
            return None;
        }
        let next = match self.current {
            Some(idx) => (idx + 1) % self.total,
            None => 0,
        };
        self.current = Some(next);
        self.current
    }

    /// Retreat with wraparound. `None` when there are no matches.
    pub fn prev(&mut self) -> Option<usize> {
        if self.total == 0 {
            return None;
        }
        let prev = match self.current {
            Some(0) | None => self.total - 1,
            Some(idx) => (idx - 1).min(self.total - 1),
        };
        self.current = Some(prev);
        self.current
    }
}

/// Scroll offset that centers `line` in the viewport, never negative.
#[must_use]
pub fn centered_scroll_offset(line: usize, line_height_px: f64, viewport_height_px: f64) -> f64 {
    let viewport = if viewport_height_px.is_finite() {
        viewport_height_px.max(0.0)
    } else {
        0.0
    };
    (line as f64 * line_height_px - viewport / 2.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cursor_never_moves() {
        let mut c = MatchCursor::for_total(0);
        assert_eq!(c.current(), None);
        assert_eq!(c.next(), None);
        assert_eq!(c.prev(), None);
        assert_eq!(c.current(), None);
    }

    #[test]
    fn fresh_cursor_starts_at_zero() {
        assert_eq!(MatchCursor::for_total(3).current(), Some(0));
    }

    #[test]
    fn next_wraps_after_total_steps() {
        let mut c = MatchCursor::for_total(4);
        let seen: Vec<_> = (0..4).map(|_| c.next()).collect();
        assert_eq!(seen, vec![Some(1), Some(2), Some(3), Some(0)]);
    }

    #[test]
    fn prev_from_zero_wraps_to_last() {
        let mut c = MatchCursor::for_total(5);
        assert_eq!(c.prev(), Some(4));
        assert_eq!(c.prev(), Some(3));
    }

    #[test]
    fn single_match_stays_put() {
        let mut c = MatchCursor::for_total(1);
        assert_eq!(c.next(), Some(0));
        assert_eq!(c.prev(), Some(0));
    }

    #[test]
    fn clear_resets() {
        let mut c = MatchCursor::for_total(2);
        c.clear();
        assert_eq!(c, MatchCursor::default());
        assert_eq!(c.next(), None);
    }

    #[test]
    fn centering_clamps_at_top() {
        assert_eq!(centered_scroll_offset(3, 18.0, 540.0), 0.0);
        assert_eq!(centered_scroll_offset(100, 18.0, 540.0), 1_800.0 - 270.0);
        assert_eq!(centered_scroll_offset(10, 18.0, f64::NAN), 180.0);
    }
}
