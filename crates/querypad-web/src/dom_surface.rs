//! [`Surface`] backed by a DOM scroll container.
//!
//! Layout inside the host's container:
//!
//! ```text
//! container (overflow-y: auto; position: relative)
//! ├── spacer  (height = total_lines * line_height)
//! └── block   (position: absolute; transform: translateY(block_offset))
//! ```
//!
//! Style and listener failures inside a frame are dropped; only
//! [`DomSurface::attach`] reports DOM errors to the host.

use std::collections::HashMap;

use js_sys::Function;
use querypad_view::{FrameToken, RenderedBlock, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

pub(crate) struct HostCallbacks {
    /// Called with the frame token as its first argument.
    pub on_frame: Function,
    pub on_scroll: Function,
    pub on_resize: Function,
}

pub(crate) struct DomSurface {
    window: Window,
    container: HtmlElement,
    spacer: HtmlElement,
    block: HtmlElement,
    callbacks: HostCallbacks,
    subscribed: bool,
    next_token: u32,
    /// Token -> `requestAnimationFrame` handle.
    frames: HashMap<u32, i32>,
}

impl DomSurface {
    pub(crate) fn attach(
        container: HtmlElement,
        block_class: &str,
        callbacks: HostCallbacks,
    ) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let style = container.style();
        style.set_property("overflow-y", "auto")?;
        style.set_property("position", "relative")?;

        let spacer = create_div(&document)?;
        spacer.style().set_property("height", "0px")?;

        let block = create_div(&document)?;
        block.set_class_name(block_class);
        let block_style = block.style();
        block_style.set_property("position", "absolute")?;
        block_style.set_property("top", "0")?;
        block_style.set_property("left", "0")?;
        block_style.set_property("right", "0")?;
        block_style.set_property("will-change", "transform")?;

        container.append_child(&spacer)?;
        container.append_child(&block)?;

        Ok(Self {
            window,
            container,
            spacer,
            block,
            callbacks,
            subscribed: false,
            next_token: 0,
            frames: HashMap::new(),
        })
    }

    /// Forget the handle of a frame that has been delivered.
    pub(crate) fn frame_delivered(&mut self, token: FrameToken) {
        self.frames.remove(&token.0);
    }

    /// Remove the spacer and block from the container.
    pub(crate) fn detach(&mut self) {
        self.spacer.remove();
        self.block.remove();
    }
}

fn create_div(document: &Document) -> Result<HtmlElement, JsValue> {
    document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str("div is not an HtmlElement"))
}

impl Surface for DomSurface {
    fn scroll_offset(&self) -> f64 {
        f64::from(self.container.scroll_top())
    }

    fn viewport_height(&self) -> f64 {
        f64::from(self.container.client_height())
    }

    fn set_scroll_offset(&mut self, px: f64) {
        #[allow(clippy::cast_possible_truncation)]
        self.container.set_scroll_top(px.round() as i32);
    }

    fn set_content_height(&mut self, px: f64) {
        let _ = self
            .spacer
            .style()
            .set_property("height", &format!("{px}px"));
    }

    fn replace_content(&mut self, block: &RenderedBlock) {
        self.block.set_inner_html(&block.to_html());
    }

    fn set_block_offset(&mut self, px: f64) {
        let _ = self
            .block
            .style()
            .set_property("transform", &format!("translateY({px}px)"));
    }

    fn subscribe(&mut self) {
        if self.subscribed {
            return;
        }
        let _ = self
            .container
            .add_event_listener_with_callback("scroll", &self.callbacks.on_scroll);
        let _ = self
            .window
            .add_event_listener_with_callback("resize", &self.callbacks.on_resize);
        self.subscribed = true;
    }

    fn unsubscribe(&mut self) {
        if !self.subscribed {
            return;
        }
        let _ = self
            .container
            .remove_event_listener_with_callback("scroll", &self.callbacks.on_scroll);
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", &self.callbacks.on_resize);
        self.subscribed = false;
    }

    fn request_frame(&mut self) -> Option<FrameToken> {
        self.next_token = self.next_token.wrapping_add(1);
        let token = self.next_token;
        let callback = self
            .callbacks
            .on_frame
            .bind1(&JsValue::NULL, &JsValue::from(token));
        let handle = self.window.request_animation_frame(&callback).ok()?;
        self.frames.insert(token, handle);
        Some(FrameToken(token))
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if let Some(handle) = self.frames.remove(&token.0) {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }
}
