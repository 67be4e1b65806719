//! Smoothed pointer parallax.
//!
//! [`ParallaxTracker`] follows the pointer with a fixed-fraction lerp each
//! tick and stops asking for frames once it has settled, so an idle page
//! costs nothing.

use centauri_config::MotionConfig;
use glam::DVec2;
use tracing::debug;

/// Pixels a full-viewport pointer sweep shifts the backdrop.
const VIEWPORT_DRIFT_RANGE: f64 = 40.0;

/// Screen-space rectangle the pointer is normalised against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PointerRect {
    /// A rectangle anchored at the origin.
    #[must_use]
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    /// Map a pointer position to `[-1, 1]` on both axes, clamped.
    ///
    /// A degenerate rectangle maps everything to the centre.
    #[must_use]
    pub fn normalize(&self, x: f64, y: f64) -> DVec2 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return DVec2::ZERO;
        }
        let nx = (x - self.left) / self.width * 2.0 - 1.0;
        let ny = (y - self.top) / self.height * 2.0 - 1.0;
        DVec2::new(nx, ny).clamp(DVec2::NEG_ONE, DVec2::ONE)
    }
}

/// Eased pointer offset driving per-node parallax.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxTracker {
    state: DVec2,
    target: DVec2,
    smoothing: f64,
    strength: f64,
    settle_epsilon: f64,
    enabled: bool,
}

impl ParallaxTracker {
    /// Build from config. Under reduced motion the tracker never moves.
    #[must_use]
    pub fn new(config: &MotionConfig, reduced_motion: bool) -> Self {
        let enabled = !(reduced_motion || config.reduced_motion);
        if !enabled {
            debug!("parallax disabled for reduced motion");
        }
        Self {
            state: DVec2::ZERO,
            target: DVec2::ZERO,
            smoothing: config.parallax_smoothing.clamp(0.0, 1.0),
            strength: config.parallax_strength,
            settle_epsilon: config.settle_epsilon,
            enabled,
        }
    }

    /// Whether pointer input has any effect.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Pointer moved to `(x, y)` inside `rect`.
    pub fn on_pointer_move(&mut self, x: f64, y: f64, rect: PointerRect) {
        if self.enabled && x.is_finite() && y.is_finite() {
            self.target = rect.normalize(x, y);
        }
    }

    /// Pointer left the tracked area: drift back to centre.
    pub fn on_pointer_leave(&mut self) {
        self.target = DVec2::ZERO;
    }

    /// Ease toward the target. Returns whether another tick is needed.
    pub fn tick(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.state += (self.target - self.state) * self.smoothing;

        let remaining = (self.target - self.state).abs();
        if remaining.max_element() < self.settle_epsilon {
            self.state = self.target;
            return false;
        }
        true
    }

    /// Current eased pointer offset in `[-1, 1]`.
    #[must_use]
    pub fn state(&self) -> DVec2 {
        self.state
    }

    /// Where the tracker is heading.
    #[must_use]
    pub fn target(&self) -> DVec2 {
        self.target
    }

    /// Displacement of a node at `depth`; deeper nodes move further.
    #[must_use]
    pub fn node_offset(&self, depth: f64) -> DVec2 {
        self.state * self.strength * depth
    }
}

/// Backdrop drift in pixels for a pointer at `(x, y)` in a `width × height` viewport.
#[must_use]
pub fn viewport_drift(x: f64, y: f64, width: f64, height: f64) -> DVec2 {
    if width <= 0.0 || height <= 0.0 {
        return DVec2::ZERO;
    }
    DVec2::new(
        (x / width - 0.5) * VIEWPORT_DRIFT_RANGE,
        (y / height - 0.5) * VIEWPORT_DRIFT_RANGE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ParallaxTracker {
        ParallaxTracker::new(&MotionConfig::default(), false)
    }

    #[test]
    fn test_normalize_corners_and_centre() {
        let rect = PointerRect {
            left: 100.0,
            top: 50.0,
            width: 200.0,
            height: 100.0,
        };
        assert_eq!(rect.normalize(100.0, 50.0), DVec2::NEG_ONE);
        assert_eq!(rect.normalize(300.0, 150.0), DVec2::ONE);
        assert_eq!(rect.normalize(200.0, 100.0), DVec2::ZERO);
        assert_eq!(rect.normalize(900.0, -40.0), DVec2::new(1.0, -1.0));
    }

    #[test]
    fn test_first_tick_moves_seven_percent() {
        let mut p = tracker();
        p.on_pointer_move(400.0, 200.0, PointerRect::sized(400.0, 400.0));
        assert!(p.tick());
        assert!((p.state().x - 0.07).abs() < 1e-12);
        assert!(p.state().y.abs() < 1e-12);
    }

    #[test]
    fn test_settles_on_target() {
        let mut p = tracker();
        p.on_pointer_move(0.0, 0.0, PointerRect::sized(100.0, 100.0));
        let mut ticks = 0;
        while p.tick() {
            ticks += 1;
            assert!(ticks < 1_000, "parallax never settled");
        }
        assert_eq!(p.state(), DVec2::NEG_ONE);
        assert!(!p.tick());
    }

    #[test]
    fn test_pointer_leave_returns_to_centre() {
        let mut p = tracker();
        p.on_pointer_move(100.0, 100.0, PointerRect::sized(100.0, 100.0));
        while p.tick() {}
        p.on_pointer_leave();
        while p.tick() {}
        assert_eq!(p.state(), DVec2::ZERO);
    }

    #[test]
    fn test_reduced_motion_ignores_pointer() {
        let mut p = ParallaxTracker::new(&MotionConfig::default(), true);
        assert!(!p.is_enabled());
        p.on_pointer_move(0.0, 0.0, PointerRect::sized(100.0, 100.0));
        assert!(!p.tick());
        assert_eq!(p.node_offset(3.0), DVec2::ZERO);
    }

    #[test]
    fn test_node_offset_scales_with_depth() {
        let mut p = tracker();
        p.on_pointer_move(100.0, 50.0, PointerRect::sized(100.0, 100.0));
        while p.tick() {}
        let offset = p.node_offset(2.0);
        assert!((offset.x - 0.1).abs() < 1e-12);
        assert!(offset.y.abs() < 1e-12);
    }

    #[test]
    fn test_viewport_drift_range() {
        assert_eq!(viewport_drift(500.0, 300.0, 1000.0, 600.0), DVec2::ZERO);
        assert_eq!(viewport_drift(0.0, 600.0, 1000.0, 600.0), DVec2::new(-20.0, 20.0));
        assert_eq!(viewport_drift(10.0, 10.0, 0.0, 600.0), DVec2::ZERO);
    }
}
