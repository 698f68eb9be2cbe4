//! The text viewer: line store, render mode, window, search and navigation
//! behind one owner.
//!
//! # Lifecycle
//!
//! 1. [`TextViewer::new`] subscribes to the surface's notifications.
//! 2. [`TextViewer::set_text`] / [`TextViewer::set_lines`] replace the
//!    document, clear search and render immediately.
//! 3. Scroll and resize notifications go to [`TextViewer::on_scroll`] /
//!    [`TextViewer::on_resize`]; they are coalesced into one frame, and
//!    [`TextViewer::on_frame`] recomputes the window when it fires.
//! 4. [`TextViewer::search`] indexes the whole document;
//!    [`TextViewer::next_match`] / [`TextViewer::prev_match`] move the
//!    current match and scroll it to the middle of the viewport.
//! 5. [`TextViewer::destroy`] cancels the pending frame and unsubscribes.
//!    Afterwards every mutating call is a no-op.

use serde::Serialize;

use crate::config::{SearchConfig, ViewerConfig};
use crate::error::ConfigError;
use crate::highlight::RenderedBlock;
use crate::line_store::{LineStore, RenderMode};
use crate::navigator::{MatchCursor, centered_scroll_offset};
use crate::scheduler::FrameScheduler;
use crate::search::{MatchRecord, SearchIndex};
use crate::stats::RenderStats;
use crate::surface::{FrameToken, Surface};
use crate::window::{LineRange, WindowState, compute_window};

/// 1-based position of the current match among all matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchInfo {
    pub current: usize,
    pub total: usize,
}

#[derive(Debug)]
pub struct TextViewer<S: Surface> {
    config: ViewerConfig,
    surface: S,
    store: LineStore,
    mode: RenderMode,
    window: WindowState,
    /// `None` when no search is active.
    search: Option<SearchIndex>,
    cursor: MatchCursor,
    scheduler: FrameScheduler,
    stats: RenderStats,
    destroyed: bool,
}

impl<S: Surface> TextViewer<S> {
    /// Create a viewer over `surface` and subscribe to its notifications.
    pub fn new(surface: S, config: ViewerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(surface, config))
    }

    /// Create a viewer with [`ViewerConfig::default`].
    pub fn with_defaults(surface: S) -> Self {
        Self::build(surface, ViewerConfig::default())
    }

    fn build(surface: S, config: ViewerConfig) -> Self {
        let mut viewer = Self {
            config,
            surface,
            store: LineStore::default(),
            mode: RenderMode::Direct,
            window: WindowState::new(),
            search: None,
            cursor: MatchCursor::default(),
            scheduler: FrameScheduler::new(),
            stats: RenderStats::default(),
            destroyed: false,
        };
        viewer.surface.subscribe();
        viewer
    }

    // -- Document ----------------------------------------------------------

    /// Replace the document with `text` split on `\n`.
    pub fn set_text(&mut self, text: &str) {
        if self.destroyed {
            return;
        }
        self.replace_store(LineStore::from_text(text));
    }

    /// Replace the document with `lines`.
    pub fn set_lines(&mut self, lines: Vec<String>) {
        if self.destroyed {
            return;
        }
        self.replace_store(LineStore::from_lines(lines));
    }

    fn replace_store(&mut self, store: LineStore) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("set_lines", total_lines = store.len()).entered();

        self.store = store;
        self.search = None;
        self.cursor.clear();
        self.mode = RenderMode::select(self.store.len(), self.config.activation_threshold);
        self.window.invalidate();
        self.surface
            .set_content_height(self.store.len() as f64 * self.config.line_height_px);

        #[cfg(feature = "tracing")]
        tracing::debug!(mode = ?self.mode, "render mode selected");

        match self.mode {
            RenderMode::Direct => self.paint_all(),
            RenderMode::Windowed => {
                self.surface.set_scroll_offset(0.0);
                let viewport = self.surface.viewport_height();
                self.recompute_window(0.0, viewport);
            }
        }
    }

    /// All lines rejoined with `\n`, independent of what is materialized.
    #[must_use]
    pub fn full_text(&self) -> String {
        self.store.full_text()
    }

    // -- Windowing ---------------------------------------------------------

    /// Recompute the materialized window for a scroll position.
    ///
    /// Returns the new range, or `None` when nothing was rendered: direct
    /// mode, a destroyed viewer, or a range equal to the stored one.
    pub fn recompute_window(
        &mut self,
        scroll_offset_px: f64,
        viewport_height_px: f64,
    ) -> Option<LineRange> {
        if self.destroyed || !self.mode.is_windowed() {
            return None;
        }
        let range = compute_window(
            scroll_offset_px,
            viewport_height_px,
            self.config.line_height_px,
            self.config.buffer_lines,
            self.store.len(),
        );
        if !self.window.update(range) {
            self.stats.skipped_recomputes += 1;
            #[cfg(feature = "tracing")]
            tracing::trace!(start = range.start, end = range.end, "window unchanged");
            return None;
        }
        self.paint(range);
        Some(range)
    }

    /// Scroll notification from the surface. Coalesced to one frame.
    pub fn on_scroll(&mut self) {
        self.schedule_frame();
    }

    /// Resize notification from the surface. Coalesced to one frame.
    pub fn on_resize(&mut self) {
        self.schedule_frame();
    }

    /// Frame callback. Ignores tokens other than the pending one.
    pub fn on_frame(&mut self, token: FrameToken) -> Option<LineRange> {
        if self.destroyed {
            return None;
        }
        let coalesced = self.scheduler.take(token)?;
        self.stats.coalesced_notifications += u64::from(coalesced);
        let scroll = self.surface.scroll_offset();
        let viewport = self.surface.viewport_height();
        self.recompute_window(scroll, viewport)
    }

    fn schedule_frame(&mut self) {
        if self.destroyed || !self.mode.is_windowed() {
            return;
        }
        if !self.scheduler.request() {
            return;
        }
        match self.surface.request_frame() {
            Some(token) => {
                self.scheduler.arm(token);
                self.stats.frames_requested += 1;
            }
            None => {
                // Nothing will fire; let the next notification try again.
                self.scheduler.cancel();
                #[cfg(feature = "tracing")]
                tracing::warn!("surface refused a frame request");
            }
        }
    }

    fn paint(&mut self, range: LineRange) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("render_window", start = range.start, end = range.end)
            .entered();

        let block = RenderedBlock::build(
            &self.store,
            range,
            self.search.as_ref(),
            self.cursor.current(),
            self.config.line_height_px,
        );
        self.surface
            .set_block_offset(block.range.start as f64 * self.config.line_height_px);
        self.surface.replace_content(&block);
        self.stats.renders += 1;
        self.stats.lines_materialized = block.len();
    }

    fn paint_all(&mut self) {
        self.paint(LineRange::new(0, self.store.len()));
    }

    /// Re-render the current view with fresh highlight state.
    fn refresh(&mut self) {
        match self.mode {
            RenderMode::Direct => self.paint_all(),
            RenderMode::Windowed => {
                self.window.invalidate();
                let scroll = self.surface.scroll_offset();
                let viewport = self.surface.viewport_height();
                self.recompute_window(scroll, viewport);
            }
        }
    }

    // -- Search ------------------------------------------------------------

    /// Search with the configured [`SearchConfig`]. Returns the match count.
    pub fn search(&mut self, query: &str) -> usize {
        self.search_with_config(query, self.config.search)
    }

    /// Search the whole document for `query` taken literally.
    ///
    /// An empty query clears the search. Otherwise the current match is
    /// reset to the first one. Either way the view is re-rendered.
    pub fn search_with_config(&mut self, query: &str, config: SearchConfig) -> usize {
        if self.destroyed {
            return 0;
        }
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("search", query_len = query.len()).entered();

        if query.is_empty() {
            self.search = None;
            self.cursor.clear();
            self.refresh();
            return 0;
        }

        let index = SearchIndex::build(self.store.iter(), query, config);
        let total = index.len();
        self.stats.searches += 1;
        self.cursor = MatchCursor::for_total(total);
        self.search = Some(index);

        #[cfg(feature = "tracing")]
        tracing::debug!(total, "search complete");

        self.refresh();
        total
    }

    /// Clear the active search and its highlights.
    pub fn clear_search(&mut self) {
        self.search_with_config("", self.config.search);
    }

    /// Move to the next match, wrapping, and scroll it into view.
    pub fn next_match(&mut self) -> Option<usize> {
        if self.destroyed {
            return None;
        }
        let idx = self.cursor.next()?;
        self.reveal_match(idx);
        Some(idx)
    }

    /// Move to the previous match, wrapping, and scroll it into view.
    pub fn prev_match(&mut self) -> Option<usize> {
        if self.destroyed {
            return None;
        }
        let idx = self.cursor.prev()?;
        self.reveal_match(idx);
        Some(idx)
    }

    fn reveal_match(&mut self, idx: usize) {
        let Some(line) = self
            .search
            .as_ref()
            .and_then(|s| s.get(idx))
            .map(|m| m.line_index)
        else {
            return;
        };
        let target = centered_scroll_offset(
            line,
            self.config.line_height_px,
            self.surface.viewport_height(),
        );
        self.surface.set_scroll_offset(target);
        self.refresh();
    }

    /// `(current, total)` with a 1-based `current`; `None` without matches.
    #[must_use]
    pub fn match_info(&self) -> Option<MatchInfo> {
        let current = self.cursor.current()?;
        Some(MatchInfo {
            current: current + 1,
            total: self.cursor.total(),
        })
    }

    // -- Teardown ----------------------------------------------------------

    /// Cancel any pending frame, release the surface's listeners and drop
    /// the document. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        if let Some(token) = self.scheduler.cancel() {
            self.surface.cancel_frame(token);
        }
        self.surface.unsubscribe();
        self.store = LineStore::default();
        self.search = None;
        self.cursor.clear();
        self.window.invalidate();
        self.destroyed = true;
    }

    // -- Accessors ---------------------------------------------------------

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for hosts that need to update surface geometry.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    #[must_use]
    pub fn total_lines(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn line_store(&self) -> &LineStore {
        &self.store
    }

    /// Last materialized window; `None` in direct mode or when stale.
    #[must_use]
    pub fn window(&self) -> Option<LineRange> {
        self.window.current()
    }

    #[must_use]
    pub fn search_index(&self) -> Option<&SearchIndex> {
        self.search.as_ref()
    }

    /// The active query, `None` when no search is active.
    #[must_use]
    pub fn search_query(&self) -> Option<&str> {
        self.search.as_ref().map(SearchIndex::query)
    }

    #[must_use]
    pub fn matches(&self) -> &[MatchRecord] {
        self.search.as_ref().map_or(&[][..], SearchIndex::matches)
    }

    #[must_use]
    pub fn current_match_index(&self) -> Option<usize> {
        self.cursor.current()
    }

    #[must_use]
    pub fn current_match(&self) -> Option<&MatchRecord> {
        let idx = self.cursor.current()?;
        self.search.as_ref()?.get(idx)
    }

    #[must_use]
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }
}
