use crate::viewport::backing_size;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> Option<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
}

/// 2D context of `canvas`, or `None` if the browser refuses one.
pub fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<web::CanvasRenderingContext2d>().ok())
}

/// Match the canvas backing store to its CSS size times the device pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let rect = canvas.get_bounding_client_rect();
        let (css_w, css_h) = if rect.width() > 0.0 && rect.height() > 0.0 {
            (rect.width(), rect.height())
        } else {
            // not laid out yet; fall back to the viewport like a fixed full-screen canvas
            (
                w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
                w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
            )
        };
        let (width, height) = backing_size(css_w, css_h, w.device_pixel_ratio());
        canvas.set_width(width);
        canvas.set_height(height);
    }
}

/// Register `handler` for window `resize`. The listener lives as long as the page.
pub fn on_window_resize(mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Run `f` once after `delay_ms`.
pub fn set_timeout(delay_ms: i32, f: impl FnOnce() + 'static) {
    if let Some(window) = web::window() {
        let cb = Closure::once_into_js(f);
        let cb: &js_sys::Function = cb.unchecked_ref();
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(cb, delay_ms) {
            log::warn!("setTimeout failed: {:?}", e);
        }
    }
}
