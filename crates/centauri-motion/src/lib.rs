//! Pointer parallax and scroll-linked transforms for the page around the scene.

pub mod parallax;
pub mod scroll;

pub use parallax::{ParallaxTracker, PointerRect, viewport_drift};
pub use scroll::{ScrollTransform, map_range};
