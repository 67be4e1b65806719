//! Configuration for the Centauri scene.
//!
//! Scene constants (orbit rate, camera distance, pulse shape, twin star
//! layout) are runtime settings persisted as a RON file. CLI flags override
//! whatever was loaded, and a loaded config can be hot-reloaded.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BodyConfig, Config, DebugConfig, MotionConfig, SceneConfig, TwinStarConfig,
};
pub use error::ConfigError;
