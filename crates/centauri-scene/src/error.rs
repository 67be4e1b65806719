//! Error types for the scene and its renderer contract.

/// Failures reported by a [`RenderSink`](crate::RenderSink).
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No graphics context could be created (no GPU, context lost, headless host).
    #[error("rendering context unavailable: {0}")]
    ContextUnavailable(String),

    /// The renderer rejected a geometry or material description.
    #[error("renderer rejected body: {0}")]
    Rejected(String),
}

/// Failures while generating a procedural texture.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// A texture needs at least one pixel per side.
    #[error("texture size must be non-zero")]
    ZeroSize,

    /// Requested size is larger than any renderer will accept.
    #[error("texture size {size} exceeds the {max} pixel limit")]
    TooLarge {
        /// Requested width/height.
        size: u32,
        /// Largest accepted width/height.
        max: u32,
    },
}

/// Failures while mounting an [`OrbitalCameraScene`](crate::OrbitalCameraScene).
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// The renderer could not create one of the scene's bodies.
    #[error("failed to create scene body: {0}")]
    Render(#[from] RenderError),

    /// The star sprite could not be generated.
    #[error("failed to generate star sprite: {0}")]
    Texture(#[from] TextureError),
}
