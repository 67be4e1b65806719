//! Headless host for the orbit scene: frame loop, platform directories, a
//! tracing renderer and sprite export.

pub mod frame_loop;
pub mod platform;
pub mod preview;
pub mod sprite;
pub mod trace_sink;
