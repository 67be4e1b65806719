//! Configuration structs with the scene's stock values as defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_NAME: &str = "centauri";
const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Camera orbit and constellation layout.
    pub scene: SceneConfig,
    /// Per-body size, hover and pulse settings.
    pub bodies: BodyConfig,
    /// The orbiting binary pair.
    pub twin_stars: TwinStarConfig,
    /// Reduced motion, parallax and drag tuning.
    pub motion: MotionConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Camera orbit and constellation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Autonomous orbit speed in radians per second.
    pub orbit_rate: f64,
    /// Distance from the camera to the look-at target's vertical axis.
    pub camera_distance: f64,
    /// Fixed camera height while orbiting autonomously.
    pub camera_height: f64,
    /// Point the camera aims at.
    pub look_at: [f64; 3],
    /// Draw the static constellation nodes and edges.
    pub show_constellation: bool,
    /// Uniform scale applied to constellation node positions.
    pub group_scale: f64,
    /// Edge opacity with no node hovered.
    pub line_opacity: f64,
    /// Edge opacity while any node is hovered.
    pub line_opacity_hovered: f64,
}

/// Size, hover and pulse settings shared by every body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BodyConfig {
    /// Radius of a constellation node sphere.
    pub base_size: f64,
    /// Scale multiplier while hovered.
    pub hover_scale: f64,
    /// Relative amplitude of the idle pulse.
    pub pulse_amplitude: f64,
    /// Pulse frequency in radians per wall-clock second.
    pub pulse_frequency: f64,
    /// Sphere tessellation (width and height segments).
    pub sphere_segments: u32,
}

/// Layout of the orbiting binary pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TwinStarConfig {
    /// Add the pair to the scene.
    pub enabled: bool,
    /// Shared orbit radius.
    pub orbit_radius: f64,
    /// Shared angular speed in radians per second of scene time.
    pub angular_speed: f64,
    /// Sprite size of each star.
    pub base_size: f64,
    /// Id of the first star; the second one uses `first_id + 1`.
    pub first_id: u32,
    /// Width/height of the generated sprite texture in pixels.
    pub sprite_size: u32,
    /// Seed for the sprite's sparkle pattern.
    pub sprite_seed: u64,
    /// Blackbody temperature used to tint the sprite.
    pub temperature_k: f32,
}

/// Reduced-motion override, parallax and drag tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Force reduced motion regardless of what the host reports.
    pub reduced_motion: bool,
    /// Fraction of the remaining distance the parallax covers per tick.
    pub parallax_smoothing: f64,
    /// Parallax displacement per unit of pointer offset and depth.
    pub parallax_strength: f64,
    /// Parallax is settled once both axes are this close to the target.
    pub settle_epsilon: f64,
    /// Drag rotation speed of the orbit controls.
    pub drag_rotate_speed: f64,
}

/// Debug/development settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log every transform written to the renderer at `trace` level.
    pub log_transforms: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            orbit_rate: 0.1,
            camera_distance: 4.4,
            camera_height: 0.0,
            look_at: [0.0, 0.25, 0.0],
            show_constellation: true,
            group_scale: 1.05,
            line_opacity: 0.26,
            line_opacity_hovered: 0.22,
        }
    }
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            base_size: 0.022,
            hover_scale: 1.2,
            pulse_amplitude: 0.007,
            pulse_frequency: 1.0,
            sphere_segments: 24,
        }
    }
}

impl Default for TwinStarConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            orbit_radius: 0.6,
            angular_speed: 0.35,
            base_size: 0.06,
            first_id: 101,
            sprite_size: 64,
            sprite_seed: 7,
            temperature_k: 6500.0,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            parallax_smoothing: 0.07,
            parallax_strength: 0.05,
            settle_epsilon: 0.001,
            drag_rotate_speed: 0.28,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_transforms: false,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Platform config directory for the scene (`<os config dir>/centauri`).
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|base| base.join(APP_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .separate_tuple_members(false)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject values that would make the scene degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scene.camera_distance.is_finite() && self.scene.camera_distance > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "scene.camera_distance",
                reason: "must be a positive finite number",
            });
        }
        if !self.scene.orbit_rate.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "scene.orbit_rate",
                reason: "must be finite",
            });
        }
        if self.bodies.base_size <= 0.0 || self.twin_stars.base_size <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "bodies.base_size",
                reason: "body sizes must be positive",
            });
        }
        if self.twin_stars.sprite_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "twin_stars.sprite_size",
                reason: "must be at least one pixel",
            });
        }
        if !(self.motion.parallax_smoothing > 0.0 && self.motion.parallax_smoothing <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "motion.parallax_smoothing",
                reason: "must be in (0, 1]",
            });
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}
