//! Orbit scene: an autonomously orbiting camera over a constellation and a pair
//! of twin stars, with seamless hand-off to user drags and reduced-motion support.

pub mod body;
pub mod clock;
pub mod constellation;
pub mod drag;
pub mod error;
pub mod orbit;
pub mod scene;
pub mod sink;
pub mod texture;
pub mod view;

pub use body::{OrbitingBody, Pulse};
pub use clock::{InstantClock, ManualClock, SharedClock, WallClock, sanitize_delta};
pub use constellation::{ConstellationNode, ConstellationTable, EDGES, NODES};
pub use drag::{DragController, azimuth_of};
pub use error::{RenderError, SceneError, TextureError};
pub use orbit::{CameraRig, InteractionMode, OrbitState};
pub use scene::OrbitalCameraScene;
pub use sink::{BodyDesc, BodyHandle, Geometry, Material, RenderSink};
pub use texture::{MAX_TEXTURE_SIZE, StarTexture, blackbody_to_rgb};
pub use view::SceneView;
