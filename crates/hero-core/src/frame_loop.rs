use std::cell::Cell;
use std::rc::Rc;

/// Shared stop flag for a self-rescheduling frame loop.
///
/// The loop checks [`LoopHandle::is_stopped`] before each frame and before
/// requesting the next one; clones share the flag.
#[derive(Clone, Debug, Default)]
pub struct LoopHandle {
    stopped: Rc<Cell<bool>>,
    frames: Rc<Cell<u64>>,
}

impl LoopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.set(true);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    /// Count a frame; returns whether the loop should keep going.
    pub fn record_frame(&self) -> bool {
        if self.is_stopped() {
            return false;
        }
        self.frames.set(self.frames.get() + 1);
        true
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames.get()
    }
}
