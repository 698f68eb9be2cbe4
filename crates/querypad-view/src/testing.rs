//! Headless surface for tests and native hosts.
//!
//! [`RecordingSurface`] keeps scroll geometry in plain fields and records
//! every block, offset and frame request it receives, so tests can assert
//! on exactly what would have been painted.

use crate::highlight::RenderedBlock;
use crate::surface::{FrameToken, Surface};

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub scroll_offset: f64,
    pub viewport_height: f64,
    pub content_height: f64,
    pub block_offset: f64,
    pub subscribed: bool,
    /// Every block passed to `replace_content`, oldest first.
    pub blocks: Vec<RenderedBlock>,
    /// Frames requested and not yet cancelled or fired.
    pub pending_frames: Vec<FrameToken>,
    pub cancelled_frames: Vec<FrameToken>,
    /// When set, `request_frame` fails as a host without a frame source would.
    pub refuse_frames: bool,
    next_token: u32,
}

impl RecordingSurface {
    /// A surface with the given viewport height, scrolled to the top.
    #[must_use]
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height,
            ..Self::default()
        }
    }

    /// Render-count probe.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn last_block(&self) -> Option<&RenderedBlock> {
        self.blocks.last()
    }

    /// Remove and return the oldest pending frame, as the display would.
    pub fn fire_frame(&mut self) -> Option<FrameToken> {
        if self.pending_frames.is_empty() {
            None
        } else {
            Some(self.pending_frames.remove(0))
        }
    }
}

impl Surface for RecordingSurface {
    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn set_scroll_offset(&mut self, px: f64) {
        self.scroll_offset = px;
    }

    fn set_content_height(&mut self, px: f64) {
        self.content_height = px;
    }

    fn replace_content(&mut self, block: &RenderedBlock) {
        self.blocks.push(block.clone());
    }

    fn set_block_offset(&mut self, px: f64) {
        self.block_offset = px;
    }

    fn subscribe(&mut self) {
        self.subscribed = true;
    }

    fn unsubscribe(&mut self) {
        self.subscribed = false;
    }

    fn request_frame(&mut self) -> Option<FrameToken> {
        if self.refuse_frames {
            return None;
        }
        self.next_token = self.next_token.wrapping_add(1);
        let token = FrameToken(self.next_token);
        self.pending_frames.push(token);
        Some(token)
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending_frames.retain(|t| *t != token);
        self.cancelled_frames.push(token);
    }
}
