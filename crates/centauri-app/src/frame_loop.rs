//! Variable-step frame loop.
//!
//! The scene is driven by real frame deltas rather than fixed simulation
//! steps, so there is no accumulator. A stalled frame is still clamped so a
//! resumed process does not fling the camera halfway round its orbit.

use std::time::Instant;

use centauri_scene::sanitize_delta;
use tracing::warn;

/// Longest frame the scene is allowed to observe (250 ms, 4 FPS).
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Frame timing state.
pub struct FrameLoop {
    previous_time: Instant,
    total_time: f64,
    frame_count: u64,
}

impl FrameLoop {
    /// Creates a new `FrameLoop` starting from the current instant.
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Measure the time since the previous tick and run one frame with it.
    pub fn tick(&mut self, frame_fn: impl FnMut(f64)) {
        let current_time = Instant::now();
        let frame_time = current_time
            .duration_since(self.previous_time)
            .as_secs_f64();
        self.previous_time = current_time;
        self.tick_with(frame_time, frame_fn);
    }

    /// Run one frame with an explicit frame time in seconds.
    ///
    /// `frame_fn` receives the clamped delta exactly once. Negative or
    /// non-finite frame times become zero.
    pub fn tick_with(&mut self, frame_time: f64, mut frame_fn: impl FnMut(f64)) {
        let mut frame_time = sanitize_delta(frame_time);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        frame_fn(frame_time);
        self.total_time += frame_time;
        self.frame_count += 1;
    }

    /// Returns the total number of frames run.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the accumulated valid frame time in seconds.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}
