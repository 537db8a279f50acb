//! Capture orchestration over an injected world host
//!
//! This module handles:
//! - Region resolution from corner markers and the area smoother
//! - Output sizing and camera framing
//! - The end-to-end capture sequence with save-mutate-restore view discipline

pub mod orchestrator;
pub mod region;

pub use orchestrator::{
    CameraState, CaptureContext, CaptureOrchestrator, Trigger, ViewSnapshot, WorldHost,
};
pub use region::{camera_frame, pixel_dimensions, region_from_markers};
