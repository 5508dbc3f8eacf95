//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`ROADRAGE_SECTION__KEY`)
//!
//! Values are in the units people think in (km/h, degrees); the
//! `to_*` conversions hand SI values to the engine crates.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use roadrage_input::DriverSettings;
use roadrage_math::units::{DEG_TO_RAD, KMHS_TO_MSS, KMH_TO_MS};
use roadrage_math::{ProjectiveTransform, DEFAULT_FAR, DEFAULT_NEAR};
use roadrage_physics::CarLimits;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "ROADRAGE_";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub car: CarConfig,
    #[serde(default)]
    pub driver: DriverConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub level: LevelConfig,
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`ROADRAGE_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // ROADRAGE_CAR__MAX_SPEED_KMH=80 -> car.max_speed_kmh = 80
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Viewport aspect ratio
    pub fn aspect(&self) -> f32 {
        self.window.width as f32 / self.window.height.max(1) as f32
    }
}

/// Window configuration
///
/// Nothing is opened; the size only shapes the projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Orbit spin in degrees per second; the level's value when unset
    pub orbit_speed_deg: Option<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            orbit_speed_deg: None,
        }
    }
}

impl CameraConfig {
    /// Projection for a viewport of the given aspect ratio
    pub fn projection(&self, aspect: f32) -> ProjectiveTransform {
        ProjectiveTransform::perspective(self.fov, aspect, self.near, self.far)
    }
}

/// Car limits in km/h, km/h/s and degrees
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarConfig {
    pub max_steering_deg: f32,
    pub max_steering_rate_deg: f32,
    pub max_speed_kmh: f32,
    pub min_speed_kmh: f32,
    pub max_accel_kmhs: f32,
    pub min_accel_kmhs: f32,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            max_steering_deg: 45.0,
            max_steering_rate_deg: 360.0,
            max_speed_kmh: 120.0,
            min_speed_kmh: 0.0,
            max_accel_kmhs: 20.0,
            min_accel_kmhs: -50.0,
        }
    }
}

impl CarConfig {
    /// Convert to the SI limits the car works with
    pub fn to_limits(&self) -> CarLimits {
        CarLimits {
            max_steering_angle: self.max_steering_deg * DEG_TO_RAD,
            max_steering_vel: self.max_steering_rate_deg * DEG_TO_RAD,
            max_speed: self.max_speed_kmh * KMH_TO_MS,
            min_speed: self.min_speed_kmh * KMH_TO_MS,
            max_accel: self.max_accel_kmhs * KMHS_TO_MSS,
            min_accel: self.min_accel_kmhs * KMHS_TO_MSS,
        }
    }
}

/// How the avatar's driver handles the wheel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Steering rate while left/right is held, degrees per second
    pub steer_rate_deg: f32,
    /// Centering gain with no steering held (1/s)
    pub recenter_gain: f32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            steer_rate_deg: 45.0,
            recenter_gain: 5.0,
        }
    }
}

impl DriverConfig {
    pub fn to_settings(&self) -> DriverSettings {
        DriverSettings {
            steer_rate: self.steer_rate_deg * DEG_TO_RAD,
            recenter_gain: self.recenter_gain,
        }
    }
}

/// Simulation loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seconds per frame; 0 runs on the wall clock
    pub fixed_timestep: f32,
    /// Frames longer than this are clamped (seconds)
    pub max_dt: f32,
    /// Seconds to run before exiting
    pub duration: f32,
    /// Seconds between avatar status lines; 0 disables them
    pub status_interval: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            max_dt: 0.25,
            duration: 10.0,
            status_interval: 1.0,
        }
    }
}

impl SimulationConfig {
    /// Whether frames advance by a fixed step instead of the wall clock
    pub fn is_fixed_step(&self) -> bool {
        self.fixed_timestep > 0.0
    }
}

/// Level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Path to the level RON file
    pub path: String,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            path: "levels/default.ron".to_string(),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
