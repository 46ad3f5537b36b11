use crate::canvas::CanvasSurface;
use crate::dom;
use fx_core::{CancelToken, Control, Effect, Runner, Surface};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Per-canvas state driven by `requestAnimationFrame`.
pub struct FrameContext<E: Effect> {
    pub runner: Rc<RefCell<Runner<E>>>,
    pub canvas: web::HtmlCanvasElement,
    ctx: Option<web::CanvasRenderingContext2d>,
    epoch: Instant,
}

impl<E: Effect> FrameContext<E> {
    pub fn new(
        runner: Rc<RefCell<Runner<E>>>,
        canvas: web::HtmlCanvasElement,
        epoch: Instant,
    ) -> Self {
        Self {
            runner,
            canvas,
            ctx: None,
            epoch,
        }
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    pub fn frame(&mut self) -> Control {
        // acquire lazily: until the browser hands out a context, frames are skipped
        if self.ctx.is_none() {
            self.ctx = dom::context_2d(&self.canvas);
        }
        let now = self.now();
        let mut surface = self
            .ctx
            .as_ref()
            .map(|ctx| CanvasSurface::new(&self.canvas, ctx));
        self.runner
            .borrow_mut()
            .tick(now, surface.as_mut().map(|s| s as &mut dyn Surface))
    }
}

/// Running animation loop; dropping it does not stop the loop, `cancel` does.
pub struct LoopHandle {
    token: CancelToken,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: TickClosure,
}

impl LoopHandle {
    /// Stop requesting frames and release the callback.
    pub fn cancel(&self) {
        self.token.cancel();
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.tick.borrow_mut().take();
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }
}

fn request_frame(tick: &TickClosure, raf_id: &Cell<Option<i32>>) {
    let id = web::window().and_then(|w| {
        let cb = tick.borrow();
        let cb = cb.as_ref()?;
        w.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
    });
    raf_id.set(id);
}

pub fn start_loop<E: Effect + 'static>(frame_ctx: FrameContext<E>) -> LoopHandle {
    let token = frame_ctx.runner.borrow().token();
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let tick_clone = tick.clone();
    let raf_clone = raf_id.clone();
    let mut frame_ctx = frame_ctx;
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_clone.set(None);
        match frame_ctx.frame() {
            Control::Continue => request_frame(&tick_clone, &raf_clone),
            Control::Stop => {
                // the closure cannot drop itself while running; release it on the next task
                let release = tick_clone.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    release.borrow_mut().take();
                });
            }
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &raf_id);

    LoopHandle {
        token,
        raf_id,
        tick,
    }
}
