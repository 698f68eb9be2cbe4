#![forbid(unsafe_code)]

//! View: windowed rendering and search for large query results.
//!
//! # Role in QueryPad
//! `querypad-view` renders the text produced by the query engine. Small
//! results are materialized in full; large results (hundreds of thousands of
//! lines of pretty-printed JSON) are materialized one viewport window at a
//! time so memory and per-frame work stay proportional to the viewport.
//!
//! # Primary responsibilities
//! - **LineStore / RenderMode**: the text as lines, and the direct-vs-windowed
//!   decision made on every new result.
//! - **Window calculation**: scroll offset + viewport height to a half-open
//!   line range with a symmetric buffer margin.
//! - **SearchIndex**: case-insensitive literal matches over the whole
//!   document, numbered top-to-bottom.
//! - **Highlighting**: splicing match spans into the materialized lines, with
//!   exactly one current match.
//! - **MatchCursor**: circular next/previous navigation.
//!
//! # How it fits in the system
//! [`TextViewer`] owns all of the above and drives an abstract [`Surface`].
//! The web crate (`querypad-web`) supplies a DOM-backed surface; tests use
//! [`testing::RecordingSurface`].

pub mod config;
pub mod error;
pub mod highlight;
pub mod line_store;
pub mod logging;
pub mod navigator;
pub mod scheduler;
pub mod search;
pub mod stats;
pub mod surface;
pub mod testing;
pub mod viewer;
pub mod window;

pub use config::{SearchConfig, ViewerConfig};
pub use error::ConfigError;
pub use highlight::{RenderedBlock, RenderedLine, Span, SpanKind};
pub use line_store::{LineStore, RenderMode};
pub use navigator::MatchCursor;
pub use scheduler::FrameScheduler;
pub use search::{MatchRecord, SearchIndex};
pub use stats::RenderStats;
pub use surface::{FrameToken, Surface};
pub use viewer::{MatchInfo, TextViewer};
pub use window::{LineRange, WindowState};
