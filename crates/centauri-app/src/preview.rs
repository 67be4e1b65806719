//! Scripted headless run of the orbit scene.

use std::time::Duration;

use centauri_config::Config;
use centauri_motion::{ParallaxTracker, PointerRect, viewport_drift};
use centauri_scene::{InteractionMode, SceneView, azimuth_of, sanitize_delta};
use glam::{DVec2, DVec3};
use tracing::{debug, info};

use crate::frame_loop::FrameLoop;
use crate::trace_sink::TraceSink;

/// How to drive the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewOptions {
    /// Frames to run.
    pub frames: u32,
    /// Fixed frame delta in seconds (ignored when `realtime`).
    pub frame_dt: f64,
    /// Measure real frame times, pacing frames at roughly `frame_dt`.
    pub realtime: bool,
    /// Frame on which a scripted drag begins.
    pub drag_start: Option<u32>,
    /// Length of the scripted drag in frames.
    pub drag_frames: u32,
    /// Horizontal pointer movement per drag frame, in pixels.
    pub drag_dx: f64,
    /// Viewport size the pointer moves in.
    pub viewport: DVec2,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_dt: 1.0 / 60.0,
            realtime: false,
            drag_start: None,
            drag_frames: 30,
            drag_dx: 4.0,
            viewport: DVec2::new(1280.0, 720.0),
        }
    }
}

impl PreviewOptions {
    fn drags_on(&self, frame: u32) -> (bool, bool) {
        match self.drag_start {
            Some(start) => (frame == start, frame == start.saturating_add(self.drag_frames)),
            None => (false, false),
        }
    }
}

/// What the scene looked like when the run finished.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewReport {
    /// Frames run.
    pub frames: u64,
    /// Shared scene time in seconds; zero for a placeholder.
    pub elapsed: f64,
    /// Final orbit angle in radians.
    pub angle: f64,
    /// Final interaction mode.
    pub mode: InteractionMode,
    /// Last camera position the renderer received, if any.
    pub camera: Option<DVec3>,
    /// Renderer objects still alive before teardown.
    pub live_bodies: usize,
    /// Eased pointer offset in `[-1, 1]`.
    pub parallax: DVec2,
    /// Parallax displacement of a node at unit depth.
    pub node_offset: DVec2,
    /// Backdrop drift in pixels for the last pointer position.
    pub backdrop_drift: DVec2,
}

/// Run `view` through `options`, scripting a drag if asked.
///
/// The pointer that performs the drag also feeds `parallax`, starting from
/// the viewport centre and leaving the page when the drag ends.
pub fn run_preview(
    view: &mut SceneView<TraceSink>,
    config: &Config,
    options: &PreviewOptions,
    parallax: &mut ParallaxTracker,
    mut on_frame: impl FnMut(f64),
) -> PreviewReport {
    let mut frame_loop = FrameLoop::new();
    let rect = PointerRect::sized(options.viewport.x, options.viewport.y);
    let mut pointer = options.viewport * 0.5;
    let target = DVec3::from_array(config.scene.look_at);
    let pace = Duration::try_from_secs_f64(sanitize_delta(options.frame_dt).min(1.0))
        .unwrap_or_default();

    for frame in 0..options.frames {
        let (drag_begins, drag_ends) = options.drags_on(frame);

        if drag_begins && let SceneView::Live(scene) = view {
            let angle = azimuth_of(scene.camera_position(), scene.look_at());
            scene.sink_mut().drag_mut().begin(angle);
            scene.on_drag_start();
            info!(frame, angle, "scripted drag started");
        }
        if drag_ends && let SceneView::Live(scene) = view {
            scene.on_drag_end();
            scene.sink_mut().drag_mut().end();
            parallax.on_pointer_leave();
            let azimuth = scene.sink().drag().azimuth();
            info!(frame, azimuth, "scripted drag released");
        }

        if let SceneView::Live(scene) = view
            && scene.sink().drag().is_active()
        {
            pointer.x += options.drag_dx;
            parallax.on_pointer_move(pointer.x, pointer.y, rect);
            let sink = scene.sink_mut();
            sink.drag_mut().drag_by(options.drag_dx);
            sink.follow_drag(config.scene.camera_distance, config.scene.camera_height, target);
        }
        parallax.tick();

        if options.realtime {
            std::thread::sleep(pace);
            frame_loop.tick(|dt| {
                on_frame(dt);
                view.update(dt);
            });
        } else {
            frame_loop.tick_with(options.frame_dt, |dt| {
                on_frame(dt);
                view.update(dt);
            });
        }
    }

    let report = PreviewReport {
        frames: frame_loop.frame_count(),
        elapsed: view.scene().map_or(0.0, |s| s.elapsed()),
        angle: view.scene().map_or(0.0, |s| s.angle()),
        mode: view.mode(),
        camera: view.scene().and_then(|s| s.sink().camera()).map(|(p, _)| p),
        live_bodies: view.scene().map_or(0, |s| s.sink().live_count()),
        parallax: parallax.state(),
        node_offset: parallax.node_offset(1.0),
        backdrop_drift: viewport_drift(
            pointer.x,
            pointer.y,
            options.viewport.x,
            options.viewport.y,
        ),
    };
    debug!(?report, "preview finished");
    report
}
