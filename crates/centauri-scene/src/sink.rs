//! The contract between the scene and whatever actually draws it.
//!
//! The scene never touches a graphics API. It describes bodies once, then
//! writes transforms every frame through [`RenderSink`]; the host forwards
//! pointer and drag events back into the scene.

use std::sync::Arc;

use glam::DVec3;

use crate::error::RenderError;
use crate::texture::StarTexture;

/// Opaque id of a renderer-side object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u32);

/// Shape of a renderer-side object.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Unit sphere; the per-frame scale sets its radius.
    Sphere {
        /// Width and height segments.
        segments: u32,
    },
    /// Camera-facing unit quad.
    Billboard,
    /// Straight segment between two fixed points.
    Line {
        /// Start point.
        from: DVec3,
        /// End point.
        to: DVec3,
        /// Width in pixels.
        width: f32,
    },
}

/// Surface of a renderer-side object.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Flat, unlit colour (linear RGBA).
    Basic {
        /// Colour.
        color: [f32; 4],
    },
    /// Additive sprite sampling a generated texture.
    Sprite {
        /// Shared sprite texture; released with the last body using it.
        texture: Arc<StarTexture>,
    },
    /// Transparent line colour; opacity is updated per frame.
    Line {
        /// Colour.
        color: [f32; 4],
        /// Starting opacity.
        opacity: f64,
    },
}

/// Everything needed to create one object.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    /// Shape.
    pub geometry: Geometry,
    /// Surface.
    pub material: Material,
}

/// Commands the scene issues to the rendering engine.
pub trait RenderSink {
    /// Create an object. An error here means the scene cannot be shown at all.
    fn create_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle, RenderError>;

    /// Move an object.
    fn set_position(&mut self, handle: BodyHandle, position: DVec3);

    /// Uniformly scale an object.
    fn set_scale(&mut self, handle: BodyHandle, scale: f64);

    /// Change an object's opacity.
    fn set_opacity(&mut self, handle: BodyHandle, opacity: f64);

    /// Place the camera and aim it at `target`.
    fn set_camera(&mut self, position: DVec3, target: DVec3);

    /// Azimuth reported by the drag controller, if one is active.
    fn current_azimuth(&self) -> Option<f64>;

    /// Free an object and whatever GPU resources only it was using.
    fn release(&mut self, handle: BodyHandle);
}
