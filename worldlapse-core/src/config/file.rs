//! Configuration file loading and merging
//!
//! Loads user configuration from `~/.config/worldlapse/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::{
    default_export_path, CaptureConfig, FeedbackMode, ImageFormat, NamingPolicy, SizingMode,
};
use crate::error::{LapseError, Result};

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Scheduling settings
    #[serde(default)]
    pub schedule: ScheduleSettings,

    /// Render settings
    #[serde(default)]
    pub render: RenderSettings,

    /// Image output settings
    #[serde(default)]
    pub image: ImageSettings,

    /// Export settings
    #[serde(default)]
    pub export: ExportSettings,
}

/// When scheduled captures fire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSettings {
    /// Whether scheduled captures are enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Hours between scheduled captures
    #[serde(default = "default_interval")]
    pub interval: i64,

    /// Hour of the day captures are aligned to (0-23)
    #[serde(default = "default_time_of_day")]
    pub time_of_day: i64,

    /// Capture-start feedback: none, toast, modal
    #[serde(default = "default_feedback")]
    pub feedback: String,
}

/// What ends up in the rendered image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Keep zone overlays visible
    #[serde(default)]
    pub zones: bool,

    /// Keep roof/fertility/terrain/pollution/temperature overlays visible
    #[serde(default)]
    pub overlays: bool,

    /// Draw weather
    #[serde(default = "default_true")]
    pub weather: bool,

    /// Scheduled captures a region change is smoothed across (0 = jump)
    #[serde(default)]
    pub smoothing_steps: u32,
}

/// Image format and sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSettings {
    /// Output format: jpeg, png
    #[serde(default = "default_format")]
    pub format: String,

    /// JPEG quality (1-100)
    #[serde(default = "default_quality")]
    pub quality: u8,

    /// Sizing mode: pixels_per_cell or fixed_height
    #[serde(default = "default_sizing_mode")]
    pub sizing: String,

    /// Pixel density when sizing = "pixels_per_cell"
    #[serde(default = "default_pixels_per_cell")]
    pub pixels_per_cell: u32,

    /// Output height when sizing = "fixed_height"
    #[serde(default = "default_fixed_height")]
    pub fixed_height: u32,
}

/// Where and how captures land on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Base directory for exported captures
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Group captures into a per-world subdirectory
    #[serde(default)]
    pub per_world_subdir: bool,

    /// Naming policy: datetime, numbered, datetime_with_numbered_copy
    #[serde(default = "default_naming")]
    pub naming: String,
}

// Default value functions

fn default_true() -> bool {
    true
}

fn default_interval() -> i64 {
    24
}

fn default_time_of_day() -> i64 {
    8
}

fn default_feedback() -> String {
    "modal".to_string()
}

fn default_format() -> String {
    "jpeg".to_string()
}

fn default_quality() -> u8 {
    93
}

fn default_sizing_mode() -> String {
    "pixels_per_cell".to_string()
}

fn default_pixels_per_cell() -> u32 {
    32
}

fn default_fixed_height() -> u32 {
    1080
}

fn default_naming() -> String {
    "datetime".to_string()
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: default_interval(),
            time_of_day: default_time_of_day(),
            feedback: default_feedback(),
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            zones: false,
            overlays: false,
            weather: true,
            smoothing_steps: 0,
        }
    }
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            format: default_format(),
            quality: default_quality(),
            sizing: default_sizing_mode(),
            pixels_per_cell: default_pixels_per_cell(),
            fixed_height: default_fixed_height(),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            path: None,
            per_world_subdir: false,
            naming: default_naming(),
        }
    }
}

impl ConfigFile {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("worldlapse").join("config.toml")
        } else if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("worldlapse")
                .join("config.toml")
        } else {
            PathBuf::from("/etc/worldlapse/config.toml")
        }
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path())
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| LapseError::Config(format!("Failed to read config file: {}", e)))?;

        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| LapseError::Config(format!("Failed to parse config file: {}", e)))?;

        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load configuration, logging warnings but returning defaults on error
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::default_path())
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    LapseError::Config(format!("Failed to create config directory: {}", e))
                })?;
            }
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| LapseError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&path, content)
            .map_err(|e| LapseError::Config(format!("Failed to write config file: {}", e)))?;

        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Resolve the file's string-typed fields into a capture snapshot
    ///
    /// Unrecognized enum values are logged and replaced with the safe
    /// default rather than failing the capture cycle.
    pub fn to_capture_config(&self) -> CaptureConfig {
        let format: ImageFormat = self.image.format.parse().unwrap_or_else(|e| {
            warn!("{}; falling back to JPEG", e);
            ImageFormat::Jpeg
        });

        let feedback: FeedbackMode = self.schedule.feedback.parse().unwrap_or_else(|e| {
            warn!("{}; falling back to modal", e);
            FeedbackMode::Modal
        });

        let naming: NamingPolicy = self.export.naming.parse().unwrap_or_else(|e| {
            warn!("{}; falling back to datetime", e);
            NamingPolicy::DateTime
        });

        let sizing = match self.image.sizing.as_str() {
            "pixels_per_cell" => SizingMode::PixelsPerCell {
                pixels: self.image.pixels_per_cell,
            },
            "fixed_height" => SizingMode::FixedHeight {
                height: self.image.fixed_height,
            },
            other => {
                warn!(
                    "Unknown sizing mode: {}; falling back to pixels_per_cell",
                    other
                );
                SizingMode::PixelsPerCell {
                    pixels: self.image.pixels_per_cell,
                }
            }
        };

        CaptureConfig {
            enabled: self.schedule.enabled,
            interval: self.schedule.interval,
            time_of_day: self.schedule.time_of_day,
            feedback,
            render_zones: self.render.zones,
            render_overlays: self.render.overlays,
            render_weather: self.render.weather,
            format,
            quality: self.image.quality,
            sizing,
            export_path: self
                .export
                .path
                .clone()
                .unwrap_or_else(default_export_path),
            per_world_subdir: self.export.per_world_subdir,
            naming,
            smoothing_steps: self.render.smoothing_steps,
        }
    }
}

/// Generate a sample configuration file
pub fn sample_config() -> String {
    r#"# Worldlapse Configuration

[schedule]
# Enable scheduled captures
enabled = true

# Hours between scheduled captures
interval = 24

# Hour of the day captures are aligned to (0-23)
time_of_day = 8

# Capture-start feedback: none, toast, modal
feedback = "modal"

[render]
# Keep zone overlays visible in captures
zones = false

# Keep roof/fertility/terrain/pollution/temperature overlays visible
overlays = false

# Draw weather
weather = true

# Number of scheduled captures a region change is smoothed across (0 = jump)
smoothing_steps = 0

[image]
# Output format: jpeg, png
format = "jpeg"

# JPEG quality (1-100)
quality = 93

# Sizing mode: pixels_per_cell or fixed_height
sizing = "pixels_per_cell"

# Pixel density when sizing = "pixels_per_cell"
pixels_per_cell = 32

# Output height when sizing = "fixed_height" (width follows the region)
fixed_height = 1080

[export]
# Base directory for exported captures (defaults to your picture folder)
# path = "/home/user/Pictures/worldlapse"

# Group captures into a per-world subdirectory
per_world_subdir = false

# Naming policy: datetime, numbered, datetime_with_numbered_copy
naming = "datetime"
"#
    .to_string()
}
