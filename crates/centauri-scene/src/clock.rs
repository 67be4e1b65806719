//! Scene time: the shared simulation clock every body reads, and the wall
//! clock that drives cosmetic pulsing.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Replace a frame delta that must not move the scene with zero.
///
/// Negative deltas (clock skew) and non-finite ones (a resumed background tab
/// reporting garbage) are ignored for that frame rather than reported.
#[must_use]
pub fn sanitize_delta(delta: f64) -> f64 {
    if delta.is_finite() && delta > 0.0 {
        delta
    } else {
        0.0
    }
}

/// Monotonic simulation time shared by every orbiting body.
///
/// Bodies never keep their own timers, so their relative phase only depends
/// on this one value regardless of update order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SharedClock {
    elapsed: f64,
}

impl SharedClock {
    /// A clock at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta` seconds and return the sanitized step actually applied.
    pub fn advance(&mut self, delta: f64) -> f64 {
        let step = sanitize_delta(delta);
        self.elapsed += step;
        step
    }

    /// Seconds of simulation time since mount.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

/// Source of wall-clock seconds for effects that must not follow scene time.
pub trait WallClock {
    /// Seconds since some fixed origin. Must not decrease.
    fn now_seconds(&self) -> f64;
}

impl<W: WallClock + ?Sized> WallClock for Box<W> {
    fn now_seconds(&self) -> f64 {
        (**self).now_seconds()
    }
}

/// Wall clock measured from the moment it was created.
#[derive(Debug, Clone, Copy)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    /// Start measuring from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock for InstantClock {
    fn now_seconds(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Wall clock advanced by hand.
///
/// Clones share the same time, so a host can keep one handle and give the
/// scene another. Useful for deterministic replays and tests.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    seconds: Rc<Cell<f64>>,
}

impl ManualClock {
    /// A clock at zero seconds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward; invalid steps are ignored like frame deltas.
    pub fn advance(&self, seconds: f64) {
        self.seconds.set(self.seconds.get() + sanitize_delta(seconds));
    }

    /// Jump to an absolute time (never backwards).
    pub fn set(&self, seconds: f64) {
        if seconds.is_finite() && seconds > self.seconds.get() {
            self.seconds.set(seconds);
        }
    }
}

impl WallClock for ManualClock {
    fn now_seconds(&self) -> f64 {
        self.seconds.get()
    }
}
