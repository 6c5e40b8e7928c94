//! Frame scheduling support.
//!
//! The draw loop itself is re-armed from the browser's animation-frame
//! callback (see `main.rs`); each tick schedules the next one after it
//! completes, so ticks never overlap and the loop pauses with the page.
//! What lives here is the pure part: a debounce that collapses a burst of
//! viewport resizes into a single notification once the burst has been
//! quiet for a fixed period, so a drag-resize does not flood the channel.

use crate::consts::RESIZE_DEBOUNCE_MS;

/// Resize debounce state machine, polled once per tick.
#[derive(Debug)]
pub struct ResizeDebounce {
    quiet_ms: f64,
    deadline: Option<f64>,
}

impl Default for ResizeDebounce {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE_MS)
    }
}

impl ResizeDebounce {
    pub fn new(quiet_ms: f64) -> Self {
        Self {
            quiet_ms,
            deadline: None,
        }
    }

    /// Note one resize event at `now_ms`; restarts the quiet period.
    pub fn record(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.quiet_ms);
    }

    /// True exactly once per burst, at the first poll on or after the
    /// quiet period elapsing.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }
}
