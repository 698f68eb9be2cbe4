//! Per-frame coalescing of scroll and resize notifications.
//!
//! Scroll events can arrive many times between two display refreshes. The
//! viewer only needs to recompute once per frame, so notifications are
//! folded into a single pending frame request:
//!
//! 1. On every notification call [`FrameScheduler::request`]. It returns
//!    `true` only for the first notification since the last frame, which is
//!    when the host must actually request a frame.
//! 2. Record the token the host hands back with [`FrameScheduler::arm`].
//! 3. When the frame fires, [`FrameScheduler::take`] consumes the pending
//!    state and reports how many notifications were coalesced.
//! 4. At teardown [`FrameScheduler::cancel`] yields the token to cancel.

use crate::surface::FrameToken;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameScheduler {
    pending: Option<FrameToken>,
    requested: bool,
    coalesced: u32,
}

impl FrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Note a notification. Returns `true` if a new frame must be requested.
    pub fn request(&mut self) -> bool {
        self.coalesced = self.coalesced.saturating_add(1);
        if self.requested {
            return false;
        }
        self.requested = true;
        true
    }

    /// Remember the token of the frame requested after [`request`](Self::request).
    pub fn arm(&mut self, token: FrameToken) {
        self.pending = Some(token);
    }

    /// Whether a frame is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.requested
    }

    /// Consume the pending frame identified by `token`.
    ///
    /// Returns the number of coalesced notifications, or `None` when `token`
    /// is not the pending frame (a stale or cancelled callback).
    pub fn take(&mut self, token: FrameToken) -> Option<u32> {
        if !self.requested || self.pending != Some(token) {
            return None;
        }
        let coalesced = self.coalesced;
        *self = Self::default();
        Some(coalesced)
    }

    /// Drop the pending frame, returning its token for cancellation.
    pub fn cancel(&mut self) -> Option<FrameToken> {
        let token = self.pending;
        *self = Self::default();
        token
    }
}
