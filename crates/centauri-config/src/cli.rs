//! Command-line overrides for scene configuration.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// Scene options shared by every binary.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Args, Debug, Clone, Default)]
pub struct CliArgs {
    /// Autonomous orbit speed in radians per second.
    #[arg(long)]
    pub orbit_rate: Option<f64>,

    /// Camera distance from the look-at axis.
    #[arg(long)]
    pub camera_distance: Option<f64>,

    /// Force reduced motion (no automatic camera or body motion).
    #[arg(long)]
    pub reduced_motion: bool,

    /// Hide the orbiting twin stars.
    #[arg(long)]
    pub no_twin_stars: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(rate) = args.orbit_rate {
            self.scene.orbit_rate = rate;
        }
        if let Some(distance) = args.camera_distance {
            self.scene.camera_distance = distance;
        }
        if args.reduced_motion {
            self.motion.reduced_motion = true;
        }
        if args.no_twin_stars {
            self.twin_stars.enabled = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
