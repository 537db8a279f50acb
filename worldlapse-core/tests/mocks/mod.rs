//! Mock infrastructure for testing
//!
//! Provides a scriptable world host and helpers for building test
//! configurations and contexts.

use std::future::Future;

use worldlapse_core::capture::{CameraState, ViewSnapshot, WorldHost};
use worldlapse_core::config::SizingMode;
use worldlapse_core::error::{LapseError, Result};
use worldlapse_core::types::{CameraFrame, GridPoint, OverlayVisibility, PixelBuffer, SurfaceId};
use worldlapse_core::{CaptureConfig, CaptureContext, FeedbackMode, SurfaceSize};

/// World host that records every call the orchestrator makes
pub struct MockHost {
    /// Fail the next render call with a scripted error
    pub fail_render: bool,
    /// Arguments of every render call
    pub rendered: Vec<(CameraFrame, u32, u32)>,
    /// Arguments of every prepare_view call
    pub prepared: Vec<(SurfaceId, OverlayVisibility)>,
    /// Snapshots passed back to restore_view
    pub restored: Vec<ViewSnapshot>,
    /// Number of draw_weather calls
    pub weather_drawn: u32,
    /// Number of frame boundaries yielded across
    pub frames_yielded: u32,
    /// Feedback modes shown
    pub notices_shown: Vec<FeedbackMode>,
    /// Number of dismiss calls
    pub notices_dismissed: u32,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            fail_render: false,
            rendered: Vec::new(),
            prepared: Vec::new(),
            restored: Vec::new(),
            weather_drawn: 0,
            frames_yielded: 0,
            notices_shown: Vec::new(),
            notices_dismissed: 0,
        }
    }

    /// Baseline view state the mock reports before a capture
    pub fn baseline_view() -> ViewSnapshot {
        ViewSnapshot {
            camera: CameraState {
                x: 12.0,
                z: 34.0,
                size: 24.0,
            },
            overlays: OverlayVisibility::all_visible(),
            active_surface: SurfaceId::new("viewport"),
            overview_open: false,
        }
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldHost for MockHost {
    fn snapshot_view(&self) -> ViewSnapshot {
        Self::baseline_view()
    }

    fn prepare_view(&mut self, surface: &SurfaceId, overlays: OverlayVisibility) {
        self.prepared.push((surface.clone(), overlays));
    }

    fn restore_view(&mut self, snapshot: ViewSnapshot) {
        self.restored.push(snapshot);
    }

    fn draw_weather(&mut self) {
        self.weather_drawn += 1;
    }

    fn next_frame(&mut self) -> impl Future<Output = ()> {
        self.frames_yielded += 1;
        std::future::ready(())
    }

    fn render(&mut self, camera: &CameraFrame, width: u32, height: u32) -> Result<PixelBuffer> {
        self.rendered.push((*camera, width, height));
        if self.fail_render {
            return Err(LapseError::render("scripted render failure"));
        }
        Ok(gradient_buffer(width, height))
    }

    fn notify_capture_started(&mut self, mode: FeedbackMode) {
        self.notices_shown.push(mode);
    }

    fn dismiss_capture_notice(&mut self) {
        self.notices_dismissed += 1;
    }
}

/// Create a test framebuffer with a diagonal gradient pattern
pub fn gradient_buffer(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = ((x as f32 / width.max(1) as f32) * 255.0) as u8;
            let g = ((y as f32 / height.max(1) as f32) * 255.0) as u8;
            let b = (((x + y) as f32 / (width + height).max(1) as f32) * 255.0) as u8;
            data.extend_from_slice(&[r, g, b]);
        }
    }
    PixelBuffer::rgb(width, height, data)
}

/// Config pointed at a test export directory, small pixel density
pub fn test_config(export_path: impl Into<std::path::PathBuf>) -> CaptureConfig {
    CaptureConfig::with_export_root(export_path)
        .with_sizing(SizingMode::PixelsPerCell { pixels: 4 })
        .with_feedback(FeedbackMode::Toast)
}

/// Context for a small test surface at longitude zero
pub fn test_context(markers: Vec<GridPoint>) -> CaptureContext {
    CaptureContext {
        world_seed: "aurora".to_string(),
        surface_label: "home".to_string(),
        ticks: 8 * 2500,
        longitude: 0.0,
        extent: SurfaceSize::new(32, 24),
        corner_markers: markers,
    }
}
