//! Orbiting bodies and the idle pulse shared by everything drawn as a star.

use centauri_config::BodyConfig;
use glam::DVec3;
use std::f64::consts::PI;

/// A body on a circular orbit in the XY plane around the origin.
///
/// Position is a pure function of the shared clock; nothing positional is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitingBody {
    /// Stable id, also used to de-phase the pulse.
    pub id: u32,
    /// Orbit radius.
    pub orbit_radius: f64,
    /// Radians per second of scene time.
    pub angular_speed: f64,
    /// Phase at `t = 0`, in radians.
    pub phase_offset: f64,
    /// Render size before hover and pulse.
    pub base_size: f64,
    /// Pointer is over this body's hit region.
    pub hovered: bool,
}

impl OrbitingBody {
    /// `(r·cos(ω·t + φ), r·sin(ω·t + φ), 0)`.
    #[must_use]
    pub fn position_at(&self, elapsed: f64) -> DVec3 {
        let theta = self.angular_speed * elapsed + self.phase_offset;
        let (sin, cos) = theta.sin_cos();
        DVec3::new(self.orbit_radius * cos, self.orbit_radius * sin, 0.0)
    }

    /// Two identical bodies half a turn apart, so they always sit on opposite
    /// sides of the origin.
    #[must_use]
    pub fn binary_pair(
        first_id: u32,
        orbit_radius: f64,
        angular_speed: f64,
        base_size: f64,
    ) -> [Self; 2] {
        let body = |id, phase_offset| Self {
            id,
            orbit_radius,
            angular_speed,
            phase_offset,
            base_size,
            hovered: false,
        };
        [body(first_id, 0.0), body(first_id.wrapping_add(1), PI)]
    }
}

/// Hover multiplier and the small breathing pulse applied to star scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    /// Scale multiplier while hovered.
    pub hover_scale: f64,
    /// Relative pulse amplitude.
    pub amplitude: f64,
    /// Pulse frequency in radians per wall-clock second.
    pub frequency: f64,
}

impl Pulse {
    /// Render scale of a body.
    ///
    /// `hover · base · (1 + amplitude · sin(wall · frequency + id))`. With no
    /// wall time (reduced motion) the pulse term is dropped and only hover applies.
    #[must_use]
    pub fn scale(&self, base_size: f64, id: u32, hovered: bool, wall_time: Option<f64>) -> f64 {
        let hover = if hovered { self.hover_scale } else { 1.0 };
        let breathing = wall_time
            .map(|t| self.amplitude * (t * self.frequency + f64::from(id)).sin())
            .unwrap_or(0.0);
        hover * base_size * (1.0 + breathing)
    }
}

impl From<&BodyConfig> for Pulse {
    fn from(config: &BodyConfig) -> Self {
        Self {
            hover_scale: config.hover_scale,
            amplitude: config.pulse_amplitude,
            frequency: config.pulse_frequency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse() -> Pulse {
        Pulse::from(&BodyConfig::default())
    }

    #[test]
    fn test_binary_pair_is_antipodal() {
        let [a, b] = OrbitingBody::binary_pair(101, 0.6, 0.35, 0.06);
        for i in 0..50 {
            let t = i as f64 * 0.37;
            let sum = a.position_at(t) + b.position_at(t);
            assert!(sum.length() < 1e-12, "t={t}, sum={sum}");
        }
    }

    #[test]
    fn test_position_stays_on_circle() {
        let body = OrbitingBody {
            id: 1,
            orbit_radius: 2.0,
            angular_speed: 1.3,
            phase_offset: 0.4,
            base_size: 1.0,
            hovered: false,
        };
        for i in 0..20 {
            let p = body.position_at(i as f64 * 0.5);
            assert!((p.length() - 2.0).abs() < 1e-12);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_phase_offset_shifts_start() {
        let [_, b] = OrbitingBody::binary_pair(1, 1.0, 1.0, 1.0);
        let p = b.position_at(0.0);
        assert!((p - DVec3::new(-1.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_hover_scales_up() {
        let p = pulse();
        let idle = p.scale(0.022, 3, false, None);
        let hovered = p.scale(0.022, 3, true, None);
        assert!((idle - 0.022).abs() < 1e-12);
        assert!((hovered - 0.022 * 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_pulse_stays_within_amplitude() {
        let p = pulse();
        for i in 0..100 {
            let s = p.scale(1.0, 7, false, Some(i as f64 * 0.13));
            assert!((s - 1.0).abs() <= 0.007 + 1e-12, "scale {s}");
        }
    }

    #[test]
    fn test_pulse_dephased_by_id() {
        let p = pulse();
        let a = p.scale(1.0, 1, false, Some(0.0));
        let b = p.scale(1.0, 2, false, Some(0.0));
        assert!((a - b).abs() > 1e-6);
    }
}
