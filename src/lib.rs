#![cfg(target_arch = "wasm32")]
use fx_core::{AmbientField, Effect, Runner, TitleAnimator};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod attrs;
mod canvas;
mod constants;
mod dom;
mod frame;
mod overlay;
mod pointer;
mod viewport;

use constants::*;

thread_local! {
    // Handles of the running loops so the page can tear them down
    static LOOPS: RefCell<Vec<frame::LoopHandle>> = const { RefCell::new(Vec::new()) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("fx-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Stop every running effect. The intro's completion hand-off will not run afterwards.
#[wasm_bindgen]
pub fn teardown() {
    let stopped = LOOPS.with(|loops| {
        let mut loops = loops.borrow_mut();
        let running = loops.iter().filter(|h| h.is_running()).count();
        for handle in loops.drain(..) {
            handle.cancel();
        }
        running
    });
    log::info!("fx-web torn down ({} running loops stopped)", stopped);
}

fn attr_getter(el: &web::HtmlCanvasElement) -> impl Fn(&str) -> Option<String> + '_ {
    move |name| el.get_attribute(name)
}

/// Resync the backing store and restart `runner` whenever the window resizes.
fn wire_canvas_resize<E: Effect + 'static>(
    canvas: &web::HtmlCanvasElement,
    runner: &Rc<RefCell<Runner<E>>>,
    epoch: Instant,
) {
    let canvas = canvas.clone();
    let runner = Rc::downgrade(runner);
    dom::on_window_resize(move || {
        let Some(runner) = runner.upgrade() else {
            return;
        };
        dom::sync_canvas_backing_size(&canvas);
        runner
            .borrow_mut()
            .resize(canvas.width(), canvas.height(), epoch.elapsed());
    });
}

fn finish_intro() {
    // small delay so the page content starts fading in under the overlay
    dom::set_timeout(COMPLETE_DELAY_MS, || {
        let Some(document) = dom::window_document() else {
            return;
        };
        if !overlay::begin_fade(&document) {
            return;
        }
        dom::set_timeout(OVERLAY_FADE_MS, || {
            if let Some(document) = dom::window_document() {
                overlay::dismiss(&document);
                log::info!("loading screen hidden");
            }
        });
    });
}

fn start_intro(document: &web::Document, epoch: Instant) -> anyhow::Result<frame::LoopHandle> {
    let canvas = dom::canvas_by_id(document, LOADING_CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", LOADING_CANVAS_ID))?;
    overlay::reveal(document);
    dom::sync_canvas_backing_size(&canvas);

    let config = attrs::title_config(attr_getter(&canvas));
    let title = TitleAnimator::new(config, canvas.width(), canvas.height(), epoch.elapsed())?;
    let runner = Rc::new(RefCell::new(Runner::new(title).on_complete(finish_intro)));
    wire_canvas_resize(&canvas, &runner, epoch);
    Ok(frame::start_loop(frame::FrameContext::new(runner, canvas, epoch)))
}

fn start_background(
    document: &web::Document,
    epoch: Instant,
) -> anyhow::Result<Option<frame::LoopHandle>> {
    let Some(canvas) = dom::canvas_by_id(document, BACKGROUND_CANVAS_ID) else {
        log::info!("no #{}; ambient field disabled", BACKGROUND_CANVAS_ID);
        return Ok(None);
    };
    dom::sync_canvas_backing_size(&canvas);

    let config = attrs::ambient_config(attr_getter(&canvas));
    let field = AmbientField::new(config, canvas.width(), canvas.height(), epoch.elapsed())?;
    let runner = Rc::new(RefCell::new(Runner::new(field)));
    wire_canvas_resize(&canvas, &runner, epoch);
    pointer::wire_grab(&canvas, &runner);
    Ok(Some(frame::start_loop(frame::FrameContext::new(
        runner, canvas, epoch,
    ))))
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let epoch = Instant::now();

    let mut handles = Vec::with_capacity(2);
    match start_intro(&document, epoch) {
        Ok(handle) => handles.push(handle),
        Err(e) => {
            // without an intro the content must still become visible
            log::error!("intro disabled: {:?}", e);
            overlay::dismiss(&document);
        }
    }
    if let Some(handle) = start_background(&document, epoch)? {
        handles.push(handle);
    }
    LOOPS.with(|loops| loops.borrow_mut().extend(handles));
    Ok(())
}
