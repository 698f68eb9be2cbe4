//! The rendering target abstraction.
//!
//! A surface is a scrollable region that hosts one materialized block of
//! fixed-height lines. The viewer reads scroll geometry from it, pushes
//! blocks into it and asks it to schedule frames. The host forwards the
//! surface's scroll and resize notifications to
//! [`TextViewer::on_scroll`](crate::TextViewer::on_scroll) /
//! [`TextViewer::on_resize`](crate::TextViewer::on_resize).

use crate::highlight::RenderedBlock;

/// Handle of a frame callback requested from a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u32);

pub trait Surface {
    /// Current vertical scroll offset, in pixels.
    fn scroll_offset(&self) -> f64;

    /// Height of the visible area, in pixels.
    fn viewport_height(&self) -> f64;

    /// Scroll the region to `px`.
    fn set_scroll_offset(&mut self, px: f64);

    /// Total scrollable height, kept equal to `total_lines * line_height`.
    fn set_content_height(&mut self, px: f64);

    /// Replace the materialized block.
    fn replace_content(&mut self, block: &RenderedBlock);

    /// Vertical position of the materialized block within the region.
    fn set_block_offset(&mut self, px: f64);

    /// Start delivering scroll and resize notifications.
    fn subscribe(&mut self);

    /// Stop delivering notifications and release listeners.
    fn unsubscribe(&mut self);

    /// Schedule one callback on the next display refresh. `None` when the
    /// host refused the request and no callback will arrive.
    fn request_frame(&mut self) -> Option<FrameToken>;

    /// Cancel a callback returned by [`request_frame`](Self::request_frame).
    fn cancel_frame(&mut self, token: FrameToken);
}
