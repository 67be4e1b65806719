//! The decorative orbit scene: a camera circling a constellation and a pair of
//! twin stars, blended with user drags.
//!
//! One [`update`](OrbitalCameraScene::update) per rendered frame advances the
//! shared clock, resolves who owns the camera, and pushes every transform to
//! the [`RenderSink`]. Pointer and drag events are plain edge-triggered writes
//! that the next frame observes.

use std::sync::Arc;

use centauri_config::Config;
use glam::DVec3;
use tracing::{debug, info};

use crate::body::{OrbitingBody, Pulse};
use crate::clock::{InstantClock, SharedClock, WallClock};
use crate::constellation::ConstellationTable;
use crate::error::SceneError;
use crate::orbit::{CameraRig, InteractionMode, OrbitState};
use crate::sink::{BodyDesc, BodyHandle, Geometry, Material, RenderSink};
use crate::texture::StarTexture;

const INK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

#[derive(Debug)]
struct PlacedNode {
    handle: BodyHandle,
    id: u32,
    position: DVec3,
    hovered: bool,
}

#[derive(Debug)]
struct PlacedOrbiter {
    handle: BodyHandle,
    body: OrbitingBody,
}

/// Camera orbit, shared clock and every renderer object of the scene.
///
/// Owns its renderer handles: dropping the scene releases all of them.
pub struct OrbitalCameraScene<S: RenderSink> {
    sink: S,
    wall: Box<dyn WallClock>,
    orbit: OrbitState,
    clock: SharedClock,
    rig: CameraRig,
    orbit_rate: f64,
    pulse: Pulse,
    node_size: f64,
    table: ConstellationTable,
    nodes: Vec<PlacedNode>,
    orbiters: Vec<PlacedOrbiter>,
    lines: Vec<BodyHandle>,
    line_opacity: f64,
    line_opacity_hovered: f64,
    applied_line_opacity: Option<f64>,
    frames: u64,
}

impl<S: RenderSink> OrbitalCameraScene<S> {
    /// Create every body on `sink` and place the camera at angle zero.
    ///
    /// Reduced motion is fixed here: either the host's preference or the
    /// config override disables all automatic motion for the scene's lifetime.
    pub fn mount(
        sink: S,
        config: &Config,
        prefers_reduced_motion: bool,
    ) -> Result<Self, SceneError> {
        Self::mount_with_clock(sink, config, prefers_reduced_motion, InstantClock::new())
    }

    /// [`mount`](Self::mount) with an explicit wall clock for the pulse.
    pub fn mount_with_clock(
        sink: S,
        config: &Config,
        prefers_reduced_motion: bool,
        wall: impl WallClock + 'static,
    ) -> Result<Self, SceneError> {
        let reduced = prefers_reduced_motion || config.motion.reduced_motion;
        let scene = &config.scene;

        let mut this = Self {
            sink,
            wall: Box::new(wall),
            orbit: OrbitState::new(reduced),
            clock: SharedClock::new(),
            rig: CameraRig::new(
                scene.camera_distance,
                scene.camera_height,
                DVec3::from_array(scene.look_at),
            ),
            orbit_rate: scene.orbit_rate,
            pulse: Pulse::from(&config.bodies),
            node_size: config.bodies.base_size,
            table: ConstellationTable::new(),
            nodes: Vec::new(),
            orbiters: Vec::new(),
            lines: Vec::new(),
            line_opacity: scene.line_opacity,
            line_opacity_hovered: scene.line_opacity_hovered,
            applied_line_opacity: None,
            frames: 0,
        };

        // A failure part-way through drops `this`, which releases what was created.
        if scene.show_constellation {
            this.place_constellation(config)?;
        }
        if config.twin_stars.enabled {
            this.place_twin_stars(config)?;
        }

        this.write_camera();
        this.write_positions();
        let wall_time = this.pulse_time();
        this.write_scales(wall_time);
        this.write_line_opacity();

        info!(
            nodes = this.nodes.len(),
            edges = this.lines.len(),
            orbiters = this.orbiters.len(),
            mode = ?this.orbit.mode(),
            "orbit scene mounted"
        );
        Ok(this)
    }

    fn place_constellation(&mut self, config: &Config) -> Result<(), SceneError> {
        let scale = config.scene.group_scale;

        let segments: Vec<_> = self.table.edge_segments().collect();
        for (from, to) in segments {
            let handle = self.sink.create_body(&BodyDesc {
                geometry: Geometry::Line {
                    from: from * scale,
                    to: to * scale,
                    width: 1.0,
                },
                material: Material::Line {
                    color: INK,
                    opacity: self.line_opacity,
                },
            })?;
            self.lines.push(handle);
        }

        for node in self.table.nodes() {
            let handle = self.sink.create_body(&BodyDesc {
                geometry: Geometry::Sphere {
                    segments: config.bodies.sphere_segments,
                },
                material: Material::Basic { color: INK },
            })?;
            self.nodes.push(PlacedNode {
                handle,
                id: node.id,
                position: node.position * scale,
                hovered: false,
            });
        }
        Ok(())
    }

    fn place_twin_stars(&mut self, config: &Config) -> Result<(), SceneError> {
        let twins = &config.twin_stars;
        let texture = Arc::new(StarTexture::generate(
            twins.sprite_size,
            twins.sprite_seed,
            twins.temperature_k,
        )?);

        let pair = OrbitingBody::binary_pair(
            twins.first_id,
            twins.orbit_radius,
            twins.angular_speed,
            twins.base_size,
        );
        for body in pair {
            let handle = self.sink.create_body(&BodyDesc {
                geometry: Geometry::Billboard,
                material: Material::Sprite {
                    texture: Arc::clone(&texture),
                },
            })?;
            self.orbiters.push(PlacedOrbiter { handle, body });
        }
        Ok(())
    }

    /// Advance one rendered frame by `delta` seconds.
    ///
    /// Negative or non-finite deltas count as zero. Under reduced motion only
    /// hover feedback is applied; camera and positions stay where they were.
    pub fn update(&mut self, delta: f64) {
        self.frames += 1;

        match self.orbit.mode() {
            InteractionMode::Disabled => {
                self.write_scales(None);
                self.write_line_opacity();
                return;
            }
            InteractionMode::Autonomous => {
                let step = self.clock.advance(delta);
                self.orbit.advance(step, self.orbit_rate);
                self.write_camera();
            }
            InteractionMode::UserDragging => {
                self.clock.advance(delta);
                // The drag controller owns the camera; only remember where it is.
                if let Some(azimuth) = self.sink.current_azimuth() {
                    self.orbit.track_azimuth(azimuth);
                }
            }
        }

        self.write_positions();
        let wall_time = self.pulse_time();
        self.write_scales(wall_time);
        self.write_line_opacity();
    }

    /// Drag-start edge from the host's orbit controls.
    pub fn on_drag_start(&mut self) {
        if self.orbit.begin_drag() {
            debug!(angle = self.orbit.angle(), "drag started");
        }
    }

    /// Drag-end edge. Picks up the controller's final azimuth first so the
    /// autonomous orbit resumes exactly where the user let go.
    pub fn on_drag_end(&mut self) {
        if let Some(azimuth) = self.sink.current_azimuth() {
            self.orbit.track_azimuth(azimuth);
        }
        if self.orbit.end_drag() {
            debug!(angle = self.orbit.angle(), "drag ended, resuming orbit");
        }
    }

    /// Pointer entered `handle`'s hit region. Returns whether it is one of ours.
    pub fn on_pointer_enter(&mut self, handle: BodyHandle) -> bool {
        self.set_hovered(handle, true)
    }

    /// Pointer left `handle`'s hit region. Returns whether it is one of ours.
    pub fn on_pointer_leave(&mut self, handle: BodyHandle) -> bool {
        self.set_hovered(handle, false)
    }

    fn set_hovered(&mut self, handle: BodyHandle, hovered: bool) -> bool {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.handle == handle) {
            node.hovered = hovered;
            return true;
        }
        if let Some(orbiter) = self.orbiters.iter_mut().find(|o| o.handle == handle) {
            orbiter.body.hovered = hovered;
            return true;
        }
        false
    }

    fn any_hovered(&self) -> bool {
        self.nodes.iter().any(|n| n.hovered) || self.orbiters.iter().any(|o| o.body.hovered)
    }

    fn pulse_time(&self) -> Option<f64> {
        (self.orbit.mode() != InteractionMode::Disabled).then(|| self.wall.now_seconds())
    }

    fn write_camera(&mut self) {
        let position = self.rig.orbit_to(self.orbit.angle());
        self.sink.set_camera(position, self.rig.target);
    }

    fn write_positions(&mut self) {
        let elapsed = self.clock.elapsed();
        for orbiter in &self.orbiters {
            self.sink
                .set_position(orbiter.handle, orbiter.body.position_at(elapsed));
        }
        for node in &self.nodes {
            self.sink.set_position(node.handle, node.position);
        }
    }

    fn write_scales(&mut self, wall_time: Option<f64>) {
        for orbiter in &self.orbiters {
            let body = &orbiter.body;
            let scale = self
                .pulse
                .scale(body.base_size, body.id, body.hovered, wall_time);
            self.sink.set_scale(orbiter.handle, scale);
        }
        for node in &self.nodes {
            let scale = self
                .pulse
                .scale(self.node_size, node.id, node.hovered, wall_time);
            self.sink.set_scale(node.handle, scale);
        }
    }

    fn write_line_opacity(&mut self) {
        let opacity = if self.any_hovered() {
            self.line_opacity_hovered
        } else {
            self.line_opacity
        };
        if self.applied_line_opacity == Some(opacity) {
            return;
        }
        for &line in &self.lines {
            self.sink.set_opacity(line, opacity);
        }
        self.applied_line_opacity = Some(opacity);
    }

    /// Current orbit angle in radians.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.orbit.angle()
    }

    /// Current interaction mode.
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.orbit.mode()
    }

    /// Shared simulation time in seconds.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    /// Camera position last computed by the autonomous orbit.
    #[must_use]
    pub fn camera_position(&self) -> DVec3 {
        self.rig.position()
    }

    /// Point the camera aims at.
    #[must_use]
    pub fn look_at(&self) -> DVec3 {
        self.rig.target
    }

    /// Frames processed since mount.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// The constellation lookup table.
    #[must_use]
    pub fn constellation(&self) -> &ConstellationTable {
        &self.table
    }

    /// `(handle, id, position)` of every star at the current shared time.
    pub fn body_positions(&self) -> impl Iterator<Item = (BodyHandle, u32, DVec3)> + '_ {
        let elapsed = self.clock.elapsed();
        let orbiters = self
            .orbiters
            .iter()
            .map(move |o| (o.handle, o.body.id, o.body.position_at(elapsed)));
        let nodes = self.nodes.iter().map(|n| (n.handle, n.id, n.position));
        orbiters.chain(nodes)
    }

    /// The renderer.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The renderer, mutably (hosts route pointer input through it).
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl<S: RenderSink> Drop for OrbitalCameraScene<S> {
    fn drop(&mut self) {
        let handles: Vec<BodyHandle> = self
            .lines
            .drain(..)
            .chain(self.nodes.drain(..).map(|n| n.handle))
            .chain(self.orbiters.drain(..).map(|o| o.handle))
            .collect();
        for &handle in &handles {
            self.sink.release(handle);
        }
        debug!(released = handles.len(), "orbit scene torn down");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::RenderError;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    pub(crate) struct RenderLog {
        next: u32,
        pub(crate) fail_after: Option<usize>,
        pub(crate) created: Vec<BodyHandle>,
        pub(crate) released: Vec<BodyHandle>,
        pub(crate) descs: HashMap<BodyHandle, BodyDesc>,
        pub(crate) positions: HashMap<BodyHandle, DVec3>,
        pub(crate) scales: HashMap<BodyHandle, f64>,
        pub(crate) opacities: HashMap<BodyHandle, f64>,
        pub(crate) camera: Option<(DVec3, DVec3)>,
        pub(crate) azimuth: Option<f64>,
    }

    /// Sink that records every write into a log the test keeps a handle to.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct RecordingSink(pub(crate) Rc<RefCell<RenderLog>>);

    impl RecordingSink {
        pub(crate) fn failing_after(count: usize) -> Self {
            let sink = Self::default();
            sink.0.borrow_mut().fail_after = Some(count);
            sink
        }
    }

    impl RenderSink for RecordingSink {
        fn create_body(&mut self, desc: &BodyDesc) -> Result<BodyHandle, RenderError> {
            let mut log = self.0.borrow_mut();
            if log.fail_after.is_some_and(|n| log.created.len() >= n) {
                return Err(RenderError::ContextUnavailable("no webgl".to_string()));
            }
            let handle = BodyHandle(log.next);
            log.next += 1;
            log.created.push(handle);
            log.descs.insert(handle, desc.clone());
            Ok(handle)
        }

        fn set_position(&mut self, handle: BodyHandle, position: DVec3) {
            self.0.borrow_mut().positions.insert(handle, position);
        }

        fn set_scale(&mut self, handle: BodyHandle, scale: f64) {
            self.0.borrow_mut().scales.insert(handle, scale);
        }

        fn set_opacity(&mut self, handle: BodyHandle, opacity: f64) {
            self.0.borrow_mut().opacities.insert(handle, opacity);
        }

        fn set_camera(&mut self, position: DVec3, target: DVec3) {
            self.0.borrow_mut().camera = Some((position, target));
        }

        fn current_azimuth(&self) -> Option<f64> {
            self.0.borrow().azimuth
        }

        fn release(&mut self, handle: BodyHandle) {
            self.0.borrow_mut().released.push(handle);
        }
    }

    fn mount(
        config: &Config,
        reduced: bool,
    ) -> (OrbitalCameraScene<RecordingSink>, RecordingSink, ManualClock) {
        let sink = RecordingSink::default();
        let clock = ManualClock::new();
        let scene =
            OrbitalCameraScene::mount_with_clock(sink.clone(), config, reduced, clock.clone())
                .unwrap();
        (scene, sink, clock)
    }

    fn twin_handles(scene: &OrbitalCameraScene<RecordingSink>) -> (BodyHandle, BodyHandle) {
        (scene.orbiters[0].handle, scene.orbiters[1].handle)
    }

    #[test]
    fn test_autonomous_angle_is_rate_times_total_delta() {
        let (mut scene, _, _) = mount(&Config::default(), false);
        let deltas = [0.016, 0.033, 0.0, 0.25, 0.008, 1.5];
        let mut previous = scene.angle();
        for &dt in &deltas {
            scene.update(dt);
            assert!(scene.angle() >= previous);
            previous = scene.angle();
        }
        let total: f64 = deltas.iter().sum();
        assert!((scene.angle() - 0.1 * total).abs() < 1e-12);
    }

    #[test]
    fn test_ten_one_second_frames_reach_one_radian() {
        let (mut scene, sink, _) = mount(&Config::default(), false);
        for _ in 0..10 {
            scene.update(1.0);
        }
        assert!((scene.angle() - 1.0).abs() < 1e-9);

        let (camera, target) = sink.0.borrow().camera.unwrap();
        assert!((camera - DVec3::new(3.702, 0.0, 2.377)).length() < 1e-3, "camera {camera}");
        assert_eq!(target, DVec3::new(0.0, 0.25, 0.0));
    }

    #[test]
    fn test_drag_resumes_from_released_azimuth() {
        let (mut scene, sink, _) = mount(&Config::default(), false);
        for _ in 0..5 {
            scene.update(1.0);
        }
        assert!((scene.angle() - 0.5).abs() < 1e-9);

        scene.on_drag_start();
        assert_eq!(scene.mode(), InteractionMode::UserDragging);
        for azimuth in [0.7, 0.95, 1.2] {
            sink.0.borrow_mut().azimuth = Some(azimuth);
            scene.update(0.016);
        }
        scene.on_drag_end();
        assert_eq!(scene.mode(), InteractionMode::Autonomous);
        assert!((scene.angle() - 1.2).abs() < 1e-12);

        scene.update(1.0);
        assert!((scene.angle() - 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_drag_end_reads_final_azimuth_between_frames() {
        let (mut scene, sink, _) = mount(&Config::default(), false);
        scene.on_drag_start();
        sink.0.borrow_mut().azimuth = Some(0.4);
        scene.update(0.016);
        // Pointer kept moving after the last frame.
        sink.0.borrow_mut().azimuth = Some(0.9);
        scene.on_drag_end();
        assert!((scene.angle() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_camera_untouched_while_dragging() {
        let (mut scene, sink, _) = mount(&Config::default(), false);
        scene.update(1.0);
        let before = sink.0.borrow().camera;
        scene.on_drag_start();
        sink.0.borrow_mut().azimuth = Some(2.0);
        scene.update(1.0);
        assert_eq!(sink.0.borrow().camera, before);
    }

    #[test]
    fn test_twin_stars_stay_antipodal() {
        let (mut scene, sink, _) = mount(&Config::default(), false);
        let (a, b) = twin_handles(&scene);
        for dt in [0.3, 0.7, 1.1, 2.9] {
            scene.update(dt);
            let log = sink.0.borrow();
            let sum = log.positions[&a] + log.positions[&b];
            assert!(sum.length() < 1e-12, "sum {sum}");
        }
    }

    #[test]
    fn test_reduced_motion_freezes_everything() {
        let (mut scene, sink, clock) = mount(&Config::default(), true);
        assert_eq!(scene.mode(), InteractionMode::Disabled);
        let camera = sink.0.borrow().camera;
        let positions = sink.0.borrow().positions.clone();

        scene.on_drag_start();
        sink.0.borrow_mut().azimuth = Some(1.0);
        for _ in 0..20 {
            clock.advance(0.5);
            scene.update(0.5);
        }
        scene.on_drag_end();

        assert_eq!(scene.angle(), 0.0);
        assert_eq!(scene.elapsed(), 0.0);
        assert_eq!(sink.0.borrow().camera, camera);
        assert_eq!(sink.0.borrow().positions, positions);
    }

    #[test]
    fn test_config_override_forces_reduced_motion() {
        let mut config = Config::default();
        config.motion.reduced_motion = true;
        let (scene, _, _) = mount(&config, false);
        assert_eq!(scene.mode(), InteractionMode::Disabled);
    }

    #[test]
    fn test_invalid_deltas_change_nothing() {
        let (mut scene, _, _) = mount(&Config::default(), false);
        scene.update(1.0);
        for bad in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            scene.update(bad);
        }
        assert!((scene.elapsed() - 1.0).abs() < 1e-12);
        assert!((scene.angle() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_hover_scales_node_and_dims_lines() {
        let (mut scene, sink, _) = mount(&Config::default(), false);
        let node = scene.nodes[0].handle;
        let node_id = scene.nodes[0].id;
        let line = scene.lines[0];
        assert!((sink.0.borrow().opacities[&line] - 0.26).abs() < 1e-12);

        assert!(scene.on_pointer_enter(node));
        scene.update(0.0);
        let pulse = Pulse::from(&Config::default().bodies);
        let expected = pulse.scale(0.022, node_id, true, Some(0.0));
        assert!((sink.0.borrow().scales[&node] - expected).abs() < 1e-12);
        assert!((sink.0.borrow().opacities[&line] - 0.22).abs() < 1e-12);

        assert!(scene.on_pointer_leave(node));
        scene.update(0.0);
        assert!((sink.0.borrow().opacities[&line] - 0.26).abs() < 1e-12);
    }

    #[test]
    fn test_hover_never_moves_bodies() {
        let (mut scene, sink, _) = mount(&Config::default(), false);
        let (a, _) = twin_handles(&scene);
        scene.update(0.5);
        let before = sink.0.borrow().positions[&a];

        let (mut other, other_sink, _) = mount(&Config::default(), false);
        let (oa, _) = twin_handles(&other);
        other.on_pointer_enter(oa);
        other.update(0.5);
        assert_eq!(other_sink.0.borrow().positions[&oa], before);
    }

    #[test]
    fn test_unknown_handle_is_ignored() {
        let (mut scene, _, _) = mount(&Config::default(), false);
        assert!(!scene.on_pointer_enter(BodyHandle(9_999)));
    }

    #[test]
    fn test_pulse_follows_wall_clock_not_scene_clock() {
        let (mut scene, sink, clock) = mount(&Config::default(), false);
        let (a, _) = twin_handles(&scene);

        scene.update(5.0);
        let frozen_wall = sink.0.borrow().scales[&a];
        scene.update(5.0);
        assert!((sink.0.borrow().scales[&a] - frozen_wall).abs() < 1e-15);

        clock.advance(1.0);
        scene.update(0.0);
        assert!((sink.0.borrow().scales[&a] - frozen_wall).abs() > 1e-9);
    }

    #[test]
    fn test_drop_releases_every_handle() {
        let (scene, sink, _) = mount(&Config::default(), false);
        assert_eq!(sink.0.borrow().created.len(), 15 + 14 + 2);
        drop(scene);

        let log = sink.0.borrow();
        let mut created = log.created.clone();
        let mut released = log.released.clone();
        created.sort();
        released.sort();
        assert_eq!(created, released);
    }

    #[test]
    fn test_failed_mount_releases_partial_scene() {
        let sink = RecordingSink::failing_after(20);
        let result = OrbitalCameraScene::mount(sink.clone(), &Config::default(), false);
        assert!(matches!(result, Err(SceneError::Render(_))));

        let log = sink.0.borrow();
        assert_eq!(log.created.len(), 20);
        assert_eq!(log.released.len(), 20);
    }

    #[test]
    fn test_twin_stars_share_one_sprite() {
        let (scene, sink, _) = mount(&Config::default(), false);
        let (a, b) = twin_handles(&scene);
        let log = sink.0.borrow();
        match (&log.descs[&a].material, &log.descs[&b].material) {
            (Material::Sprite { texture: ta }, Material::Sprite { texture: tb }) => {
                assert!(Arc::ptr_eq(ta, tb));
            }
            other => panic!("unexpected materials {other:?}"),
        }
    }

    #[test]
    fn test_constellation_can_be_hidden() {
        let mut config = Config::default();
        config.scene.show_constellation = false;
        config.twin_stars.enabled = false;
        let (mut scene, sink, _) = mount(&config, false);
        scene.update(1.0);
        assert!(sink.0.borrow().created.is_empty());
        assert!((scene.angle() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_body_positions_match_sink() {
        let (mut scene, sink, _) = mount(&Config::default(), false);
        scene.update(0.8);
        scene.update(0.4);
        assert_eq!(scene.frame_count(), 2);

        let log = sink.0.borrow();
        let reported: Vec<_> = scene.body_positions().collect();
        assert_eq!(reported.len(), 16);
        for (handle, _, position) in reported {
            assert!((log.positions[&handle] - position).length() < 1e-12);
        }
    }

    #[test]
    fn test_constellation_nodes_use_group_scale() {
        let (scene, sink, _) = mount(&Config::default(), false);
        let log = sink.0.borrow();
        for node in &scene.nodes {
            let raw = scene.constellation().position(node.id).unwrap();
            assert!((log.positions[&node.handle] - raw * 1.05).length() < 1e-12);
        }
    }
}
