//! Snapshot command - one-shot manual capture of the demo world
//!
//! Drives the full orchestrator/encode pipeline against a small synthetic
//! world, so the output path layout, naming and encoding can be inspected
//! without a host simulation attached.

use std::future::Future;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use tracing::info;

use worldlapse_core::capture::{CameraState, Trigger, ViewSnapshot, WorldHost};
use worldlapse_core::config::ConfigFile;
use worldlapse_core::types::{CameraFrame, OverlayVisibility, PixelBuffer, SurfaceId};
use worldlapse_core::{
    CaptureContext, CaptureOrchestrator, FeedbackMode, ImageFormat, SurfaceSize, SurfaceState,
};

/// Arguments for the snapshot command
#[derive(Args)]
pub struct SnapshotArgs {
    /// Output directory (overrides the configured export path)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Capture the full surface even if the demo world has markers
    #[arg(long)]
    pub full: bool,

    /// Output format (jpeg, png), overriding the configured one
    #[arg(long)]
    pub format: Option<String>,
}

/// A tiny self-contained world standing in for a host simulation
///
/// Shades pixels by their world position, so different capture regions
/// produce visibly different images.
struct DemoWorld;

impl WorldHost for DemoWorld {
    fn snapshot_view(&self) -> ViewSnapshot {
        ViewSnapshot {
            camera: CameraState {
                x: 0.0,
                z: 0.0,
                size: 24.0,
            },
            overlays: OverlayVisibility::all_visible(),
            active_surface: SurfaceId::new("demo"),
            overview_open: false,
        }
    }

    fn prepare_view(&mut self, _surface: &SurfaceId, _overlays: OverlayVisibility) {}

    fn restore_view(&mut self, _snapshot: ViewSnapshot) {}

    fn next_frame(&mut self) -> impl Future<Output = ()> {
        tokio::task::yield_now()
    }

    fn render(
        &mut self,
        camera: &CameraFrame,
        width: u32,
        height: u32,
    ) -> worldlapse_core::Result<PixelBuffer> {
        let half_z = camera.ortho_half_height;
        let half_x = half_z * width as f32 / height as f32;
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let wx = camera.x - half_x + (x as f32 + 0.5) / width as f32 * 2.0 * half_x;
                let wz = camera.z - half_z + (y as f32 + 0.5) / height as f32 * 2.0 * half_z;
                let r = (wx * 5.0) as i64 as u8;
                let g = (wz * 5.0) as i64 as u8;
                let b = ((wx + wz) * 3.0) as i64 as u8;
                data.extend_from_slice(&[r, g, b]);
            }
        }
        Ok(PixelBuffer::rgb(width, height, data))
    }

    fn notify_capture_started(&mut self, mode: FeedbackMode) {
        if mode != FeedbackMode::None {
            info!("capturing demo world...");
        }
    }

    fn dismiss_capture_notice(&mut self) {}
}

/// Run a one-shot manual capture of the demo world
pub async fn snapshot(args: SnapshotArgs) -> Result<()> {
    let mut config = ConfigFile::load_or_default().to_capture_config();
    if let Some(out) = args.out {
        config.export_path = out;
    }
    if let Some(format) = args.format {
        match format.parse::<ImageFormat>() {
            Ok(parsed) => config.format = parsed,
            Err(e) => bail!(e),
        }
    }
    if let Err(e) = config.validate_strict() {
        bail!("invalid configuration: {}", e);
    }

    // Day 5, 14:00 on a 48x32 demo surface
    let ctx = CaptureContext {
        world_seed: "demo".to_string(),
        surface_label: "0".to_string(),
        ticks: (5 * 24 + 14) * 2500,
        longitude: 0.0,
        extent: SurfaceSize::new(48, 32),
        corner_markers: Vec::new(),
    };

    let mut host = DemoWorld;
    let mut state = SurfaceState::default();
    let mut orchestrator = CaptureOrchestrator::new(SurfaceId::new("0"));
    orchestrator
        .run_capture(
            &mut host,
            &config,
            &mut state,
            &ctx,
            Trigger::Manual {
                force_full_extent: args.full,
            },
        )
        .await?;

    match orchestrator.finish().await {
        Some(path) => {
            println!("Snapshot written: {}", path.display());
            Ok(())
        }
        None => bail!("snapshot failed; run with -v for details"),
    }
}
