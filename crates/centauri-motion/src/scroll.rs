//! Scroll-linked fade of the hero section.

/// Linearly map `value` from `from` to `to`, clamped to the output range.
///
/// Either range may be decreasing. An empty input range yields `to.0`.
#[must_use]
pub fn map_range(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let span = from.1 - from.0;
    if span == 0.0 || !value.is_finite() {
        return to.0;
    }
    let t = ((value - from.0) / span).clamp(0.0, 1.0);
    to.0 + (to.1 - to.0) * t
}

/// Hero transform for a scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTransform {
    /// 1 at the top, 0 once half the section has scrolled past.
    pub opacity: f64,
    /// Uniform scale, shrinking from 1 to 0.8.
    pub scale: f64,
    /// Downward offset in pixels, 0 to 100.
    pub translate_y: f64,
}

impl ScrollTransform {
    /// Scroll progress at which the fade completes.
    pub const FADE_END: f64 = 0.5;

    /// Transform at scroll `progress` (0 = section top in view, 1 = scrolled past).
    #[must_use]
    pub fn at(progress: f64) -> Self {
        let range = (0.0, Self::FADE_END);
        Self {
            opacity: map_range(progress, range, (1.0, 0.0)),
            scale: map_range(progress, range, (1.0, 0.8)),
            translate_y: map_range(progress, range, (0.0, 100.0)),
        }
    }
}

impl Default for ScrollTransform {
    fn default() -> Self {
        Self::at(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_range_interpolates() {
        assert!((map_range(0.25, (0.0, 0.5), (1.0, 0.0)) - 0.5).abs() < 1e-12);
        assert!((map_range(5.0, (0.0, 10.0), (100.0, 200.0)) - 150.0).abs() < 1e-12);
    }

    #[test]
    fn test_map_range_clamps() {
        assert_eq!(map_range(-1.0, (0.0, 0.5), (0.0, 100.0)), 0.0);
        assert_eq!(map_range(3.0, (0.0, 0.5), (0.0, 100.0)), 100.0);
    }

    #[test]
    fn test_map_range_degenerate_input() {
        assert_eq!(map_range(0.3, (0.2, 0.2), (4.0, 8.0)), 4.0);
        assert_eq!(map_range(f64::NAN, (0.0, 1.0), (4.0, 8.0)), 4.0);
    }

    #[test]
    fn test_scroll_endpoints() {
        assert_eq!(ScrollTransform::default(), ScrollTransform::at(0.0));
        let top = ScrollTransform::at(0.0);
        assert_eq!((top.opacity, top.scale, top.translate_y), (1.0, 1.0, 0.0));

        let gone = ScrollTransform::at(0.5);
        assert!(gone.opacity.abs() < 1e-12);
        assert!((gone.scale - 0.8).abs() < 1e-12);
        assert!((gone.translate_y - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_scroll_clamps_past_fade() {
        assert_eq!(ScrollTransform::at(0.9), ScrollTransform::at(0.5));
        assert_eq!(ScrollTransform::at(-0.2), ScrollTransform::at(0.0));
    }

    #[test]
    fn test_scroll_midpoint() {
        let mid = ScrollTransform::at(0.25);
        assert!((mid.opacity - 0.5).abs() < 1e-12);
        assert!((mid.scale - 0.9).abs() < 1e-12);
        assert!((mid.translate_y - 50.0).abs() < 1e-12);
    }
}
