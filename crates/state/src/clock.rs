use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::trace;

#[derive(Error, Debug)]
pub enum ClockError {
    #[error("Cannot advance clock by negative milliseconds: {0}")]
    NegativeAdvance(i64),
}

/// Callback invoked with the new logical time after every advance.
pub type ClockListener = Arc<dyn Fn(i64) + Send + Sync>;

/// Logical clock driving asynchronous effects.
///
/// Time only moves when `advance` is called, so every run of a scenario
/// observes the same timeline. One clock instance is shared by all tool
/// calls within a context.
pub struct Clock {
    inner: Mutex<ClockInner>,
}

struct ClockInner {
    now_ms: i64,
    listeners: Vec<ClockListener>,
}

impl Clock {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(start_ms: i64) -> Self {
        Self {
            inner: Mutex::new(ClockInner {
                now_ms: start_ms,
                listeners: Vec::new(),
            }),
        }
    }

    /// Current logical time in milliseconds.
    pub fn now_ms(&self) -> i64 {
        self.inner.lock().now_ms
    }

    /// Advance the clock and notify listeners with the new time.
    ///
    /// Listeners run synchronously, in registration order, exactly once per
    /// advance. The listener list is snapshotted at the moment of the call:
    /// listeners added while an advance is in flight run on the next one.
    pub fn advance(&self, ms: i64) -> Result<i64, ClockError> {
        if ms < 0 {
            return Err(ClockError::NegativeAdvance(ms));
        }
        let (now_ms, listeners) = {
            let mut inner = self.inner.lock();
            inner.now_ms += ms;
            (inner.now_ms, inner.listeners.clone())
        };
        trace!(now_ms, "clock advanced");
        for listener in listeners {
            listener(now_ms);
        }
        Ok(now_ms)
    }

    /// Register a listener. Re-registering the same callback is a no-op.
    pub fn add_listener(&self, listener: ClockListener) {
        let mut inner = self.inner.lock();
        if inner.listeners.iter().any(|l| Arc::ptr_eq(l, &listener)) {
            return;
        }
        inner.listeners.push(listener);
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
