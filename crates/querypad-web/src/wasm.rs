#![forbid(unsafe_code)]

use crate::dom_surface::{DomSurface, HostCallbacks};
use crate::options::ViewerOptions;
use js_sys::{Array, Function, Object, Reflect};
use querypad_view::{FrameToken, MatchInfo, TextViewer};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

/// Large-result text viewer bound to a DOM scroll container.
///
/// The host wires three plain functions into the constructor:
///
/// ```js
/// const viewer = new QueryPadViewer(
///   el,
///   (token) => viewer.frame(token),
///   () => viewer.notifyScroll(),
///   () => viewer.notifyResize(),
///   JSON.stringify({ bufferLines: 40 }),
/// );
/// ```
#[wasm_bindgen]
pub struct QueryPadViewer {
    viewer: TextViewer<DomSurface>,
}

#[wasm_bindgen]
impl QueryPadViewer {
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        on_frame: Function,
        on_scroll: Function,
        on_resize: Function,
        options: Option<String>,
    ) -> Result<QueryPadViewer, JsValue> {
        let options = ViewerOptions::parse(options.as_deref())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let surface = DomSurface::attach(
            container,
            &options.block_class,
            HostCallbacks {
                on_frame,
                on_scroll,
                on_resize,
            },
        )?;
        let viewer = TextViewer::new(surface, options.viewer)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { viewer })
    }

    /// Replace the document with `text`, split on `\n`.
    #[wasm_bindgen(js_name = setText)]
    pub fn set_text(&mut self, text: &str) {
        self.viewer.set_text(text);
    }

    /// Replace the document with pre-split lines. Non-string entries become
    /// empty lines.
    #[wasm_bindgen(js_name = setLines)]
    pub fn set_lines(&mut self, lines: Array) {
        let lines = lines
            .iter()
            .map(|v| v.as_string().unwrap_or_default())
            .collect();
        self.viewer.set_lines(lines);
    }

    /// Run a search and return the number of matches. An empty query clears
    /// the current search.
    pub fn search(&mut self, query: &str) -> u32 {
        to_js_index(self.viewer.search(query))
    }

    /// Advance to the next match; returns its index or `-1` without matches.
    #[wasm_bindgen(js_name = nextMatch)]
    pub fn next_match(&mut self) -> i32 {
        self.viewer.next_match().map_or(-1, to_js_signed)
    }

    /// Step back to the previous match; returns its index or `-1`.
    #[wasm_bindgen(js_name = prevMatch)]
    pub fn prev_match(&mut self) -> i32 {
        self.viewer.prev_match().map_or(-1, to_js_signed)
    }

    /// `{ current, total }` with a 1-based `current`, or `null`.
    #[wasm_bindgen(js_name = getMatchInfo)]
    pub fn match_info(&self) -> JsValue {
        self.viewer
            .match_info()
            .map_or(JsValue::NULL, match_info_object)
    }

    #[wasm_bindgen(js_name = getFullText)]
    pub fn full_text(&self) -> String {
        self.viewer.full_text()
    }

    /// Deliver an animation frame requested by the viewer.
    pub fn frame(&mut self, token: u32) {
        let token = FrameToken(token);
        self.viewer.surface_mut().frame_delivered(token);
        self.viewer.on_frame(token);
    }

    #[wasm_bindgen(js_name = notifyScroll)]
    pub fn notify_scroll(&mut self) {
        self.viewer.on_scroll();
    }

    #[wasm_bindgen(js_name = notifyResize)]
    pub fn notify_resize(&mut self) {
        self.viewer.on_resize();
    }

    /// Render counters as one JSONL record tagged with `event`.
    #[wasm_bindgen(js_name = statsJsonl)]
    pub fn stats_jsonl(&self, event: &str) -> String {
        self.viewer.stats().to_jsonl(event)
    }

    /// Release listeners and pending frames and remove the viewer's
    /// elements from the container. Further calls are no-ops.
    pub fn destroy(&mut self) {
        if self.viewer.is_destroyed() {
            return;
        }
        self.viewer.destroy();
        self.viewer.surface_mut().detach();
    }
}

fn to_js_index(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn to_js_signed(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn match_info_object(info: MatchInfo) -> JsValue {
    let obj = Object::new();
    let _ = Reflect::set(
        &obj,
        &JsValue::from_str("current"),
        &JsValue::from(to_js_index(info.current)),
    );
    let _ = Reflect::set(
        &obj,
        &JsValue::from_str("total"),
        &JsValue::from(to_js_index(info.total)),
    );
    obj.into()
}
