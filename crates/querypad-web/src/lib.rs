#![forbid(unsafe_code)]

//! Web frontend for the QueryPad result viewer.
//!
//! Exposes [`querypad_view::TextViewer`] to JavaScript through
//! `wasm-bindgen`, backed by a DOM [`Surface`](querypad_view::Surface): a
//! scroll container holding a spacer sized to the full document and one
//! absolutely positioned block with the materialized lines.
//!
//! Option parsing is platform-agnostic and tested natively; the bindings and
//! the DOM surface only build for `wasm32`.

pub mod options;

#[cfg(target_arch = "wasm32")]
mod dom_surface;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use options::ViewerOptions;

#[cfg(target_arch = "wasm32")]
pub use wasm::QueryPadViewer;
