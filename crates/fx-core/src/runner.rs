//! Frame-driven execution of an effect with explicit cancellation.
//!
//! The host calls [`Runner::tick`] once per display refresh and keeps
//! scheduling frames while it returns [`Control::Continue`]. Teardown is
//! deterministic: cancelling the token (from the runner or from any clone
//! held by the host) stops the loop and drops the completion callback.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::surface::Surface;

/// Outcome of advancing an effect by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Running,
    Finished,
}

/// Something that animates on a [`Surface`].
pub trait Effect {
    /// Rebuild all state for a new surface size. Restarts the effect.
    fn resize(&mut self, width: u32, height: u32, now: Duration);

    /// Advance simulation to `now` (host clock).
    fn step(&mut self, now: Duration) -> Step;

    /// Render the current state.
    fn draw(&self, surface: &mut dyn Surface, now: Duration);
}

/// Whether the host should request another frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Stop,
}

/// Shared stop flag between a runner and its host loop.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

pub struct Runner<E: Effect> {
    effect: E,
    token: CancelToken,
    on_complete: Option<Box<dyn FnOnce()>>,
    finished: bool,
    frames: u64,
}

impl<E: Effect> Runner<E> {
    pub fn new(effect: E) -> Self {
        Self {
            effect,
            token: CancelToken::new(),
            on_complete: None,
            finished: false,
            frames: 0,
        }
    }

    /// Callback fired once when the effect finishes, unless torn down first.
    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Handle the host keeps to cancel the loop from outside.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn effect(&self) -> &E {
        &self.effect
    }

    pub fn effect_mut(&mut self) -> &mut E {
        &mut self.effect
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_stopped(&self) -> bool {
        self.finished || self.token.is_cancelled()
    }

    pub fn resize(&mut self, width: u32, height: u32, now: Duration) {
        if self.is_stopped() {
            return;
        }
        self.effect.resize(width, height, now);
    }

    /// Run one frame. A missing surface skips the frame without touching state.
    pub fn tick(&mut self, now: Duration, surface: Option<&mut dyn Surface>) -> Control {
        if self.token.is_cancelled() {
            self.on_complete = None;
            return Control::Stop;
        }
        if self.finished {
            return Control::Stop;
        }
        let Some(surface) = surface else {
            return Control::Continue;
        };
        match self.effect.step(now) {
            Step::Running => {
                self.effect.draw(surface, now);
                self.frames += 1;
                Control::Continue
            }
            Step::Finished => {
                self.finished = true;
                self.token.cancel();
                if let Some(done) = self.on_complete.take() {
                    log::info!("[runner] effect finished after {} frames", self.frames);
                    done();
                }
                Control::Stop
            }
        }
    }

    /// Stop for good. The completion callback will not fire afterwards.
    pub fn teardown(&mut self) {
        if !self.token.is_cancelled() {
            log::info!("[runner] teardown after {} frames", self.frames);
        }
        self.token.cancel();
        self.on_complete = None;
    }
}
