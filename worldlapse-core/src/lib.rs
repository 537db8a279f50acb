//! Worldlapse Core Library
//!
//! Scheduled time-lapse capture for live 2D world simulations.
//!
//! This library provides:
//! - Interval/time-of-day trigger scheduling with restart-safe state
//! - Capture-region smoothing across scheduled captures
//! - An async capture orchestrator over an injected world host
//! - JPEG/PNG encoding and collision-safe export paths
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐    ┌──────────────────────┐    ┌─────────────────┐
//! │ Trigger Scheduler │───▶│ Capture Orchestrator │───▶│ Encode Pipeline │
//! │ (in-world hours)  │    │ (region + renderer)  │    │ (bytes on disk) │
//! └───────────────────┘    └──────────────────────┘    └─────────────────┘
//! ```

pub mod capture;
pub mod clock;
pub mod config;
pub mod encode;
pub mod error;
pub mod output;
pub mod schedule;
pub mod smooth;
pub mod state;
pub mod types;

pub use capture::{CaptureContext, CaptureOrchestrator, Trigger, WorldHost};
pub use config::{CaptureConfig, FeedbackMode, ImageFormat, NamingPolicy, SizingMode};
pub use error::{LapseError, Result};
pub use schedule::{FireDecision, ScheduleState};
pub use smooth::SmoothingState;
pub use state::{StateStore, SurfaceState};
pub use types::{CaptureRegion, GridPoint, PixelBuffer, SurfaceId, SurfaceSize};
