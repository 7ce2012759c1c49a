//! Frame scheduling and drop throttling
//!
//! The host owns the real frame source (display refresh). The core only keeps
//! an authoritative running flag and asks the host to keep calling while set.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Start/stop switch for the per-frame callback
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    running: bool,
}

impl Ticker {
    /// Returns true if this call transitioned IDLE -> RUNNING
    pub fn start(&mut self) -> bool {
        let was_idle = !self.running;
        self.running = true;
        was_idle
    }

    /// Returns true if this call transitioned RUNNING -> IDLE
    pub fn stop(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        was_running
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Monotonic time source for cooldowns
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin
    fn now(&self) -> Duration;
}

/// Wall clock (`Instant` natively, `Date.now()` in the browser)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    #[cfg(target_arch = "wasm32")]
    fn now(&self) -> Duration {
        Duration::from_secs_f64(js_sys::Date::now().max(0.0) / 1000.0)
    }
}

/// Hand-advanced clock for tests and headless runs
///
/// Clones share the same time, so a test can keep a handle while the
/// simulation owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Minimum spacing between accepted actions
///
/// Rejected attempts are not queued and do not extend the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    window: Duration,
    last_accepted: Option<Duration>,
}

impl Cooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    pub fn is_ready(&self, now: Duration) -> bool {
        match self.last_accepted {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.window,
        }
    }

    /// Record an accepted action at `now`
    pub fn trigger(&mut self, now: Duration) {
        self.last_accepted = Some(now);
    }
}
