use crate::viewport::client_to_backing;
use fx_core::{AmbientField, Runner};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer position over `canvas` in backing-store pixels.
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    client_to_backing(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
        (canvas.width(), canvas.height()),
    )
}

/// Feed pointer movement to the ambient field drawn on `canvas`.
///
/// Listeners sit on the window since the background canvas does not take
/// pointer events. They live as long as the page.
pub fn wire_grab(canvas: &web::HtmlCanvasElement, runner: &Rc<RefCell<Runner<AmbientField>>>) {
    let Some(window) = web::window() else {
        return;
    };

    let canvas = canvas.clone();
    let target = Rc::downgrade(runner);
    let on_move = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if let Some(runner) = target.upgrade() {
            let pos = pointer_canvas_px(&ev, &canvas);
            runner.borrow_mut().effect_mut().set_pointer(pos);
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pointermove", on_move.as_ref().unchecked_ref());
    on_move.forget();

    let target = Rc::downgrade(runner);
    let on_out = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        // no related target: the pointer left the window
        if ev.related_target().is_some() {
            return;
        }
        if let Some(runner) = target.upgrade() {
            runner.borrow_mut().effect_mut().set_pointer(None);
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pointerout", on_out.as_ref().unchecked_ref());
    on_out.forget();
}
