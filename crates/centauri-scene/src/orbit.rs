//! Camera orbit state: the azimuth angle and who currently owns it.

use glam::DVec3;

/// Who drives the camera azimuth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    /// The scene advances the angle at a fixed rate.
    Autonomous,
    /// The external drag controller owns the camera; the scene mirrors its azimuth.
    UserDragging,
    /// Reduced motion: nothing moves on its own and drags are not tracked.
    Disabled,
}

/// Orbit angle plus interaction mode.
///
/// `angle` is unbounded; trig wraps it. It never jumps on a mode change:
/// while dragging it follows the controller, so autonomous motion resumes
/// from wherever the user let go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    angle: f64,
    mode: InteractionMode,
}

impl OrbitState {
    /// Start at angle zero. `reduced_motion` is read once here and never again.
    #[must_use]
    pub fn new(reduced_motion: bool) -> Self {
        let mode = if reduced_motion {
            InteractionMode::Disabled
        } else {
            InteractionMode::Autonomous
        };
        Self { angle: 0.0, mode }
    }

    /// Current azimuth in radians.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Current interaction mode.
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Advance by `step · rate` when autonomous. Returns whether the angle moved.
    ///
    /// `step` is expected to be sanitized already (see [`crate::sanitize_delta`]).
    pub fn advance(&mut self, step: f64, rate: f64) -> bool {
        if self.mode != InteractionMode::Autonomous || step == 0.0 {
            return false;
        }
        self.angle += step * rate;
        true
    }

    /// Mirror the drag controller's azimuth. Only honoured while dragging.
    pub fn track_azimuth(&mut self, azimuth: f64) {
        if self.mode == InteractionMode::UserDragging && azimuth.is_finite() {
            self.angle = azimuth;
        }
    }

    /// Drag-start edge. Returns whether the mode changed.
    pub fn begin_drag(&mut self) -> bool {
        match self.mode {
            InteractionMode::Autonomous => {
                self.mode = InteractionMode::UserDragging;
                true
            }
            InteractionMode::UserDragging | InteractionMode::Disabled => false,
        }
    }

    /// Drag-end edge. Returns whether the mode changed.
    pub fn end_drag(&mut self) -> bool {
        match self.mode {
            InteractionMode::UserDragging => {
                self.mode = InteractionMode::Autonomous;
                true
            }
            InteractionMode::Autonomous | InteractionMode::Disabled => false,
        }
    }
}

/// Camera placement derived from the orbit angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    /// Distance from the vertical axis through the origin.
    pub distance: f64,
    /// Fixed height of the camera.
    pub height: f64,
    /// Point the camera looks at.
    pub target: DVec3,
    position: DVec3,
}

impl CameraRig {
    /// Build a rig and place it at angle zero.
    #[must_use]
    pub fn new(distance: f64, height: f64, target: DVec3) -> Self {
        let mut rig = Self {
            distance,
            height,
            target,
            position: DVec3::ZERO,
        };
        rig.orbit_to(0.0);
        rig
    }

    /// Place the camera on its circle at `angle`: `(R·sin, h, R·cos)`.
    pub fn orbit_to(&mut self, angle: f64) -> DVec3 {
        let (sin, cos) = angle.sin_cos();
        self.position = DVec3::new(self.distance * sin, self.height, self.distance * cos);
        self.position
    }

    /// Last computed camera position.
    #[must_use]
    pub fn position(&self) -> DVec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_starts_disabled() {
        assert_eq!(OrbitState::new(true).mode(), InteractionMode::Disabled);
        assert_eq!(OrbitState::new(false).mode(), InteractionMode::Autonomous);
    }

    #[test]
    fn test_advance_only_when_autonomous() {
        let mut orbit = OrbitState::new(false);
        assert!(orbit.advance(1.0, 0.1));
        assert!(orbit.begin_drag());
        assert!(!orbit.advance(1.0, 0.1));
        assert!((orbit.angle() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_drag_round_trip_resumes_from_azimuth() {
        let mut orbit = OrbitState::new(false);
        orbit.advance(5.0, 0.1);
        orbit.begin_drag();
        orbit.track_azimuth(1.2);
        orbit.end_drag();
        assert_eq!(orbit.mode(), InteractionMode::Autonomous);
        assert!((orbit.angle() - 1.2).abs() < 1e-12);

        orbit.advance(1.0, 0.1);
        assert!((orbit.angle() - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_azimuth_ignored_outside_drag() {
        let mut orbit = OrbitState::new(false);
        orbit.track_azimuth(2.0);
        assert_eq!(orbit.angle(), 0.0);
    }

    #[test]
    fn test_disabled_ignores_drag_edges() {
        let mut orbit = OrbitState::new(true);
        assert!(!orbit.begin_drag());
        orbit.track_azimuth(1.0);
        assert!(!orbit.end_drag());
        assert_eq!(orbit.mode(), InteractionMode::Disabled);
        assert_eq!(orbit.angle(), 0.0);
    }

    #[test]
    fn test_repeated_edges_are_idempotent() {
        let mut orbit = OrbitState::new(false);
        assert!(orbit.begin_drag());
        assert!(!orbit.begin_drag());
        assert!(orbit.end_drag());
        assert!(!orbit.end_drag());
    }

    #[test]
    fn test_rig_starts_on_positive_z() {
        let rig = CameraRig::new(4.4, 0.0, DVec3::new(0.0, 0.25, 0.0));
        assert!((rig.position() - DVec3::new(0.0, 0.0, 4.4)).length() < 1e-12);
    }

    #[test]
    fn test_rig_keeps_distance_from_axis() {
        let mut rig = CameraRig::new(4.4, 0.5, DVec3::ZERO);
        for i in 0..16 {
            let p = rig.orbit_to(i as f64 * 0.7);
            assert!((p.x.hypot(p.z) - 4.4).abs() < 1e-9);
            assert!((p.y - 0.5).abs() < f64::EPSILON);
        }
    }
}
