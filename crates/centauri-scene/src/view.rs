//! What the host actually holds: a live scene, or a blank placeholder when the
//! renderer could not be brought up.

use centauri_config::Config;
use tracing::warn;

use crate::clock::{InstantClock, WallClock};
use crate::orbit::InteractionMode;
use crate::scene::OrbitalCameraScene;
use crate::sink::{BodyHandle, RenderSink};

/// A mounted scene or its inert stand-in.
///
/// The scene is decorative, so a renderer failure must never take the page
/// down with it. Every event on a placeholder is accepted and ignored.
pub enum SceneView<S: RenderSink> {
    /// Scene is running.
    Live(OrbitalCameraScene<S>),
    /// Rendering failed at mount; nothing is drawn.
    Placeholder,
}

impl<S: RenderSink> SceneView<S> {
    /// Mount the scene, degrading to [`SceneView::Placeholder`] on failure.
    pub fn mount(sink: S, config: &Config, prefers_reduced_motion: bool) -> Self {
        Self::mount_with_clock(sink, config, prefers_reduced_motion, InstantClock::new())
    }

    /// [`mount`](Self::mount) with an explicit wall clock for the pulse.
    pub fn mount_with_clock(
        sink: S,
        config: &Config,
        prefers_reduced_motion: bool,
        wall: impl WallClock + 'static,
    ) -> Self {
        match OrbitalCameraScene::mount_with_clock(sink, config, prefers_reduced_motion, wall) {
            Ok(scene) => Self::Live(scene),
            Err(e) => {
                warn!("Orbit scene unavailable, showing placeholder: {e}");
                Self::Placeholder
            }
        }
    }

    /// Whether the scene is running.
    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    /// The live scene, if any.
    #[must_use]
    pub fn scene(&self) -> Option<&OrbitalCameraScene<S>> {
        match self {
            Self::Live(scene) => Some(scene),
            Self::Placeholder => None,
        }
    }

    /// The live scene, mutably.
    pub fn scene_mut(&mut self) -> Option<&mut OrbitalCameraScene<S>> {
        match self {
            Self::Live(scene) => Some(scene),
            Self::Placeholder => None,
        }
    }

    /// Interaction mode of the live scene; a placeholder reports `Disabled`.
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.scene()
            .map_or(InteractionMode::Disabled, OrbitalCameraScene::mode)
    }

    /// Advance the live scene one frame. No-op on a placeholder.
    pub fn update(&mut self, delta: f64) {
        if let Self::Live(scene) = self {
            scene.update(delta);
        }
    }

    /// Forward a drag-start edge.
    pub fn on_drag_start(&mut self) {
        if let Self::Live(scene) = self {
            scene.on_drag_start();
        }
    }

    /// Forward a drag-end edge.
    pub fn on_drag_end(&mut self) {
        if let Self::Live(scene) = self {
            scene.on_drag_end();
        }
    }

    /// Forward a pointer-enter. Returns whether `handle` belongs to the live scene.
    pub fn on_pointer_enter(&mut self, handle: BodyHandle) -> bool {
        self.scene_mut()
            .is_some_and(|scene| scene.on_pointer_enter(handle))
    }

    /// Forward a pointer-leave. Returns whether `handle` belongs to the live scene.
    pub fn on_pointer_leave(&mut self, handle: BodyHandle) -> bool {
        self.scene_mut()
            .is_some_and(|scene| scene.on_pointer_leave(handle))
    }
}
