//! Pointer-drag orbit controller.
//!
//! Stands in for the host's orbit controls: while a drag is active it owns the
//! camera azimuth and reports it back to the scene, which mirrors it so the
//! autonomous orbit resumes without a jump.

use glam::DVec3;
use std::f64::consts::TAU;

/// Horizontal-only orbit controls driven by pointer deltas.
#[derive(Debug, Clone, PartialEq)]
pub struct DragController {
    azimuth: f64,
    rotate_speed: f64,
    viewport_height: f64,
    active: bool,
}

impl DragController {
    /// Controls for a viewport `viewport_height` pixels tall.
    ///
    /// A drag across the full viewport height turns the camera
    /// `rotate_speed` full turns.
    #[must_use]
    pub fn new(rotate_speed: f64, viewport_height: f64) -> Self {
        Self {
            azimuth: 0.0,
            rotate_speed,
            viewport_height: viewport_height.max(1.0),
            active: false,
        }
    }

    /// Start a drag from the camera's current azimuth.
    pub fn begin(&mut self, azimuth: f64) {
        self.azimuth = azimuth;
        self.active = true;
    }

    /// Apply a horizontal pointer movement in pixels. Ignored when idle.
    ///
    /// Dragging right swings the camera left around the target, so the
    /// scene appears to follow the pointer.
    pub fn drag_by(&mut self, dx_pixels: f64) {
        if !self.active || !dx_pixels.is_finite() {
            return;
        }
        self.azimuth -= TAU * dx_pixels / self.viewport_height * self.rotate_speed;
    }

    /// Finish the drag.
    pub fn end(&mut self) {
        self.active = false;
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Last azimuth, whether or not a drag is active.
    #[must_use]
    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Azimuth while dragging, `None` otherwise.
    #[must_use]
    pub fn current_azimuth(&self) -> Option<f64> {
        self.active.then_some(self.azimuth)
    }

    /// Camera position for the current azimuth on a circle of `distance` at `height`.
    #[must_use]
    pub fn camera_position(&self, distance: f64, height: f64) -> DVec3 {
        let (sin, cos) = self.azimuth.sin_cos();
        DVec3::new(distance * sin, height, distance * cos)
    }
}

/// Azimuth of `position` around the vertical axis through `target`, in `(-π, π]`.
#[must_use]
pub fn azimuth_of(position: DVec3, target: DVec3) -> f64 {
    let offset = position - target;
    offset.x.atan2(offset.z)
}
