//! Headless renderer that reports what a real one would draw.
//!
//! Bodies are tracked by handle and every command is logged through
//! `tracing`, so a preview run shows the full scene lifecycle without a GPU.

use centauri_scene::{
    BodyDesc, BodyHandle, DragController, Geometry, RenderError, RenderSink,
};
use glam::DVec3;
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

/// Live renderer-side object.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TracedBody {
    kind: &'static str,
    position: DVec3,
    scale: f64,
    opacity: f64,
}

/// [`RenderSink`] that keeps scene state in memory and logs every command.
///
/// Also hosts the orbit drag controls, since those belong to the renderer
/// side of the contract.
#[derive(Debug)]
pub struct TraceSink {
    next_handle: u32,
    bodies: FxHashMap<BodyHandle, TracedBody>,
    camera: Option<(DVec3, DVec3)>,
    drag: DragController,
    log_transforms: bool,
    context_lost: bool,
}

impl TraceSink {
    /// An empty renderer hosting `drag`. With `log_transforms` every write is traced.
    pub fn new(drag: DragController, log_transforms: bool) -> Self {
        Self {
            next_handle: 0,
            bodies: FxHashMap::default(),
            camera: None,
            drag,
            log_transforms,
            context_lost: false,
        }
    }

    /// A sink whose context is gone; every `create_body` fails.
    pub fn unavailable(drag: DragController) -> Self {
        Self {
            context_lost: true,
            ..Self::new(drag, false)
        }
    }

    /// The orbit drag controls.
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    /// The orbit drag controls, mutably.
    pub fn drag_mut(&mut self) -> &mut DragController {
        &mut self.drag
    }

    /// Move the camera where the drag controls put it. No-op when idle.
    pub fn follow_drag(&mut self, distance: f64, height: f64, target: DVec3) {
        if self.drag.is_active() {
            let position = self.drag.camera_position(distance, height);
            self.set_camera(position, target);
        }
    }

    /// Last camera placement.
    pub fn camera(&self) -> Option<(DVec3, DVec3)> {
        self.camera
    }

    /// Number of objects created and not yet released.
    pub fn live_count(&self) -> usize {
        self.bodies.len()
    }

    /// Last position written to `handle`, if it is live.
    pub fn position(&self, handle: BodyHandle) -> Option<DVec3> {
        self.bodies.get(&handle).map(|b| b.position)
    }

    /// Last scale written to `handle`, if it is live.
    pub fn scale(&self, handle: BodyHandle) -> Option<f64> {
        self.bodies.get(&handle).map(|b| b.scale)
    }

    /// Last opacity written to `handle`, if it is live.
    pub fn opacity(&self, handle: BodyHandle) -> Option<f64> {
        self.bodies.get(&handle).map(|b| b.opacity)
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut TracedBody> {
        let body = self.bodies.get_mut(&handle);
        if body.is_none() {
            warn!(handle = handle.0, "write to unknown body");
        }
        body
    }
}

impl RenderSink for TraceSink {
    fn create_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle, RenderError> {
        if self.context_lost {
            return Err(RenderError::ContextUnavailable(
                "no rendering context in this session".to_string(),
            ));
        }

        let kind = match desc.geometry {
            Geometry::Sphere { .. } => "sphere",
            Geometry::Billboard => "billboard",
            Geometry::Line { .. } => "line",
        };
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        self.bodies.insert(
            handle,
            TracedBody {
                kind,
                position: DVec3::ZERO,
                scale: 1.0,
                opacity: 1.0,
            },
        );
        debug!(handle = handle.0, kind, "created body");
        Ok(handle)
    }

    fn set_position(&mut self, handle: BodyHandle, position: DVec3) {
        let log = self.log_transforms;
        if let Some(body) = self.body_mut(handle) {
            body.position = position;
            if log {
                trace!(handle = handle.0, kind = body.kind, %position, "position");
            }
        }
    }

    fn set_scale(&mut self, handle: BodyHandle, scale: f64) {
        let log = self.log_transforms;
        if let Some(body) = self.body_mut(handle) {
            body.scale = scale;
            if log {
                trace!(handle = handle.0, kind = body.kind, scale, "scale");
            }
        }
    }

    fn set_opacity(&mut self, handle: BodyHandle, opacity: f64) {
        let log = self.log_transforms;
        if let Some(body) = self.body_mut(handle) {
            body.opacity = opacity;
            if log {
                trace!(handle = handle.0, kind = body.kind, opacity, "opacity");
            }
        }
    }

    fn set_camera(&mut self, position: DVec3, target: DVec3) {
        if self.log_transforms {
            trace!(%position, %target, "camera");
        }
        self.camera = Some((position, target));
    }

    fn current_azimuth(&self) -> Option<f64> {
        self.drag.current_azimuth()
    }

    fn release(&mut self, handle: BodyHandle) {
        match self.bodies.remove(&handle) {
            Some(body) => debug!(handle = handle.0, kind = body.kind, "released body"),
            None => warn!(handle = handle.0, "release of unknown body"),
        }
    }
}
