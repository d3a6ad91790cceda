/// Cancellable per-frame driver.
///
/// The host (browser animation frames, a terminal timer, a test) calls
/// [`FrameLoop::tick`] once per displayed frame and schedules the next call
/// only while it returns [`LoopControl::Continue`].
use std::cell::Cell;
use std::rc::Rc;

use crate::input::InputState;
use crate::renderer::SceneRenderer;
use crate::runtime::HeroRuntime;

/// Source of elapsed seconds since the loop started
pub trait Clock {
    fn elapsed(&self) -> f32;
}

/// Clock advanced by hand, for stepping frames deterministically
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f32>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, seconds: f32) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> f32 {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Handle that stops a running [`FrameLoop`] from outside the frame callback
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Rc<Cell<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

pub struct FrameLoop<C: Clock> {
    clock: C,
    cancel: CancelHandle,
    frames: u64,
}

impl<C: Clock> FrameLoop<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            cancel: CancelHandle::default(),
            frames: 0,
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run one frame. A render error is returned as-is and the loop is
    /// cancelled; nothing is retried.
    pub fn tick<R: SceneRenderer>(
        &mut self,
        runtime: &mut HeroRuntime,
        input: &mut InputState,
        renderer: &mut R,
    ) -> Result<LoopControl, R::Error> {
        if self.cancel.is_cancelled() {
            return Ok(LoopControl::Stop);
        }

        let elapsed = self.clock.elapsed();
        if let Err(err) = runtime.frame(elapsed, input, renderer) {
            self.cancel.cancel();
            return Err(err);
        }
        self.frames += 1;

        Ok(if self.cancel.is_cancelled() {
            LoopControl::Stop
        } else {
            LoopControl::Continue
        })
    }
}
