//! Configuration types for Worldlapse
//!
//! Provides the immutable capture configuration snapshot consumed by one
//! capture cycle, plus the TOML file layer that produces it.

mod file;

pub use file::{sample_config, ConfigFile};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Image output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// JPEG (small files, lossy)
    #[default]
    Jpeg,
    /// PNG (lossless)
    Png,
}

impl ImageFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Jpeg => write!(f, "JPEG"),
            Self::Png => write!(f, "PNG"),
        }
    }
}

impl std::str::FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            _ => Err(format!("Unknown image format: {}", s)),
        }
    }
}

/// How the user is told a capture has started
///
/// Shown at capture start only; encode completion is silent by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackMode {
    /// No notification
    None,
    /// Transient toast message
    Toast,
    /// Modal notice, dismissed when the render finishes
    #[default]
    Modal,
}

impl std::str::FromStr for FeedbackMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "toast" | "message" => Ok(Self::Toast),
            "modal" | "window" => Ok(Self::Modal),
            _ => Err(format!("Unknown feedback mode: {}", s)),
        }
    }
}

/// File naming scheme for exported captures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NamingPolicy {
    /// In-world date/time name
    #[default]
    DateTime,
    /// Zero-padded sequential counter name
    Numbered,
    /// Date/time name, plus a numbered copy under a `tmp` subdirectory so
    /// external tools can poll a predictable location for fresh captures
    DateTimeWithNumberedCopy,
}

impl std::str::FromStr for NamingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "datetime" | "date_time" => Ok(Self::DateTime),
            "numbered" => Ok(Self::Numbered),
            "datetime_with_numbered_copy" | "both" => Ok(Self::DateTimeWithNumberedCopy),
            _ => Err(format!("Unknown naming policy: {}", s)),
        }
    }
}

/// How output pixel dimensions are derived from the capture region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SizingMode {
    /// Fixed pixel density: each world cell maps to `pixels` output pixels
    PixelsPerCell { pixels: u32 },
    /// Fixed output height with proportional width
    FixedHeight { height: u32 },
}

impl Default for SizingMode {
    fn default() -> Self {
        Self::PixelsPerCell {
            pixels: default_pixels_per_cell(),
        }
    }
}

fn default_pixels_per_cell() -> u32 {
    32
}

fn default_jpeg_quality() -> u8 {
    93
}

/// Complete capture configuration
///
/// An immutable snapshot of the settings surface, read once per capture
/// cycle. The orchestrator and smoother never consult global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Whether scheduled captures fire at all
    pub enabled: bool,
    /// Hours between scheduled captures
    pub interval: i64,
    /// Hour of the day captures are phase-aligned to
    pub time_of_day: i64,
    /// Capture-start notification style
    pub feedback: FeedbackMode,
    /// Keep zone overlays visible in captures
    pub render_zones: bool,
    /// Keep the remaining optional overlays visible in captures
    pub render_overlays: bool,
    /// Draw weather before rendering
    pub render_weather: bool,
    /// Output image format
    pub format: ImageFormat,
    /// JPEG quality, 1-100
    pub quality: u8,
    /// Output dimension policy
    pub sizing: SizingMode,
    /// Base directory captures are written under
    pub export_path: PathBuf,
    /// Group captures into a per-world subdirectory
    pub per_world_subdir: bool,
    /// File naming scheme
    pub naming: NamingPolicy,
    /// Number of scheduled captures a region change is smoothed across
    pub smoothing_steps: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: 24,
            time_of_day: 8,
            feedback: FeedbackMode::default(),
            render_zones: false,
            render_overlays: false,
            render_weather: true,
            format: ImageFormat::default(),
            quality: default_jpeg_quality(),
            sizing: SizingMode::default(),
            export_path: default_export_path(),
            per_world_subdir: false,
            naming: NamingPolicy::default(),
            smoothing_steps: 0,
        }
    }
}

/// Default export directory: the user's picture folder, falling back to home
pub fn default_export_path() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("worldlapse")
}

impl CaptureConfig {
    /// Create a config with defaults and a specific export path
    pub fn with_export_root(path: impl Into<PathBuf>) -> Self {
        Self {
            export_path: path.into(),
            ..Self::default()
        }
    }

    /// Set the scheduled capture interval in hours
    pub fn with_interval(mut self, interval: i64) -> Self {
        self.interval = interval;
        self
    }

    /// Set the time-of-day phase
    pub fn with_time_of_day(mut self, time_of_day: i64) -> Self {
        self.time_of_day = time_of_day;
        self
    }

    /// Set the image format
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the JPEG quality
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Set the output sizing policy
    pub fn with_sizing(mut self, sizing: SizingMode) -> Self {
        self.sizing = sizing;
        self
    }

    /// Set the naming policy
    pub fn with_naming(mut self, naming: NamingPolicy) -> Self {
        self.naming = naming;
        self
    }

    /// Set the smoothing step count
    pub fn with_smoothing_steps(mut self, steps: u32) -> Self {
        self.smoothing_steps = steps;
        self
    }

    /// Set the feedback mode
    pub fn with_feedback(mut self, feedback: FeedbackMode) -> Self {
        self.feedback = feedback;
        self
    }

    /// Enable or disable scheduled captures
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Validate the configuration and return any warnings
    ///
    /// Returns a list of warning messages for settings that work but are
    /// probably not what the user wants. An empty list means the
    /// configuration looks good.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.interval > 360 {
            warnings.push(format!(
                "Interval of {} hours is more than an in-world season; the time-lapse will be very sparse.",
                self.interval
            ));
        }

        if self.quality < 50 && self.format == ImageFormat::Jpeg {
            warnings.push(format!(
                "JPEG quality {} is very low; captures will show visible artifacts.",
                self.quality
            ));
        }

        if let SizingMode::PixelsPerCell { pixels } = self.sizing {
            if pixels > 64 {
                warnings.push(format!(
                    "{} pixels per cell produces very large images for big regions.",
                    pixels
                ));
            }
        }

        if self.smoothing_steps > 30 {
            warnings.push(format!(
                "Smoothing over {} captures means a region change takes a long time to settle.",
                self.smoothing_steps
            ));
        }

        warnings
    }

    /// Validate and return an error for configurations that cannot work
    pub fn validate_strict(&self) -> Result<(), String> {
        if self.interval < 1 {
            return Err("Interval must be at least one hour".to_string());
        }

        if !(0..24).contains(&self.time_of_day) {
            return Err(format!(
                "Time of day {} is outside 0-23",
                self.time_of_day
            ));
        }

        if self.format == ImageFormat::Jpeg && !(1..=100).contains(&self.quality) {
            return Err(format!("JPEG quality {} is outside 1-100", self.quality));
        }

        match self.sizing {
            SizingMode::PixelsPerCell { pixels: 0 } => {
                return Err("Pixels per cell cannot be zero".to_string());
            }
            SizingMode::FixedHeight { height: 0 } => {
                return Err("Fixed output height cannot be zero".to_string());
            }
            _ => {}
        }

        Ok(())
    }
}
