//! Leading-edge throttling for high-frequency events such as resize.

use std::time::Duration;

use web_time::Instant;

/// Leading-edge throttle gate.
///
/// The first call passes immediately. Calls arriving before `delay` has
/// elapsed since the last passing call are dropped, not queued.
#[derive(Clone, Debug)]
pub struct Throttle {
    delay: Duration,
    last_fired: Option<Instant>,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_fired: None,
        }
    }

    /// Returns true if a call at `now` should go through, and records it.
    pub fn ready_at(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_fired {
            if now.saturating_duration_since(last) < self.delay {
                return false;
            }
        }
        self.last_fired = Some(now);
        true
    }

    pub fn ready(&mut self) -> bool {
        self.ready_at(Instant::now())
    }
}

/// Wrap `f` so it runs at most once per `delay`, on the leading edge.
pub fn throttle<A>(mut f: impl FnMut(A), delay: Duration) -> impl FnMut(A) {
    let mut gate = Throttle::new(delay);
    move |arg| {
        if gate.ready() {
            f(arg);
        }
    }
}
