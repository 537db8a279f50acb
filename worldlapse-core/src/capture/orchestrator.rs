//! Capture orchestration
//!
//! Runs one capture attempt end-to-end: resolves the region, frames the
//! camera, drives the injected renderer across host frame boundaries, and
//! hands the framebuffer to the encode pipeline. View state mutated for the
//! capture is restored no matter how the render went.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::capture::region::{camera_frame, pixel_dimensions, region_from_markers};
use crate::clock::WorldDate;
use crate::config::{CaptureConfig, FeedbackMode};
use crate::encode::{EncodePipeline, EncodeRequest};
use crate::error::Result;
use crate::output::NamingContext;
use crate::state::SurfaceState;
use crate::types::{
    CameraFrame, CaptureJob, CaptureRegion, GridPoint, OverlayVisibility, PixelBuffer, SurfaceId,
    SurfaceSize,
};

/// Host camera placement remembered across a capture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub x: f32,
    pub z: f32,
    pub size: f32,
}

/// Everything the orchestrator mutates on the host, remembered for restore
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub camera: CameraState,
    pub overlays: OverlayVisibility,
    pub active_surface: SurfaceId,
    pub overview_open: bool,
}

/// The host-side surface a capture runs against
///
/// Bundles the renderer, view-state control, the yield-to-next-frame
/// primitive and the feedback surfaces. Render results are not readable in
/// the frame that requested them, so the orchestrator suspends on
/// [`WorldHost::next_frame`] between mutating the view and reading pixels.
pub trait WorldHost {
    /// Remember the current view state
    fn snapshot_view(&self) -> ViewSnapshot;

    /// Force the capture surface active, close the world overview and apply
    /// the overlay visibility mask for the duration of the capture
    fn prepare_view(&mut self, surface: &SurfaceId, overlays: OverlayVisibility);

    /// Restore a previously taken snapshot
    fn restore_view(&mut self, snapshot: ViewSnapshot);

    /// Draw weather into the scene before rendering
    fn draw_weather(&mut self) {}

    /// Suspend until the next host frame boundary
    fn next_frame(&mut self) -> impl Future<Output = ()>;

    /// Rasterize the scene for the given camera placement
    fn render(&mut self, camera: &CameraFrame, width: u32, height: u32) -> Result<PixelBuffer>;

    /// Announce a starting capture to the user
    fn notify_capture_started(&mut self, mode: FeedbackMode);

    /// Dismiss the capture notice once rendering is done
    fn dismiss_capture_notice(&mut self);
}

/// Per-cycle snapshot of the world facts a capture needs
#[derive(Debug, Clone)]
pub struct CaptureContext {
    /// Seed string identifying the world
    pub world_seed: String,
    /// Label of the capture surface, used in file names
    pub surface_label: String,
    /// Absolute simulation ticks at trigger time
    pub ticks: i64,
    /// Longitude of the surface on the world
    pub longitude: f32,
    /// Surface size in world-grid cells
    pub extent: SurfaceSize,
    /// User-placed corner markers, possibly empty
    pub corner_markers: Vec<GridPoint>,
}

/// What caused a capture attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The schedule fired; `counter` is the fired count for numbered names
    Scheduled { counter: u64 },
    /// A user asked for a capture right now
    Manual { force_full_extent: bool },
}

impl Trigger {
    /// Whether this is an on-demand capture
    pub fn is_manual(&self) -> bool {
        matches!(self, Self::Manual { .. })
    }
}

/// Coordinates capture attempts for one surface
///
/// Captures for a surface are strictly serialized, and at most one encode
/// is in flight at a time; a new handoff waits for the previous encode.
pub struct CaptureOrchestrator {
    surface: SurfaceId,
    capturing: Arc<AtomicBool>,
    pipeline: EncodePipeline,
    encode_task: Option<JoinHandle<Option<std::path::PathBuf>>>,
}

impl CaptureOrchestrator {
    /// Create an orchestrator for a surface
    pub fn new(surface: SurfaceId) -> Self {
        Self {
            surface,
            capturing: Arc::new(AtomicBool::new(false)),
            pipeline: EncodePipeline::new(),
            encode_task: None,
        }
    }

    /// The surface this orchestrator captures
    pub fn surface(&self) -> &SurfaceId {
        &self.surface
    }

    /// Whether a capture is currently running
    ///
    /// Host integrations poll this to suppress other expensive per-frame
    /// work while a capture is in flight.
    pub fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    /// Shared handle to the capturing flag for host integrations
    pub fn capturing_flag(&self) -> Arc<AtomicBool> {
        self.capturing.clone()
    }

    /// Whether an encode is currently running
    pub fn is_encoding(&self) -> bool {
        self.pipeline.is_encoding()
    }

    /// Run one capture attempt end-to-end
    ///
    /// Render failures are logged and degrade to "no file this cycle";
    /// view restoration runs regardless. The returned future completes once
    /// the framebuffer is handed off, not when the file is on disk.
    pub async fn run_capture<H: WorldHost>(
        &mut self,
        host: &mut H,
        config: &CaptureConfig,
        state: &mut SurfaceState,
        ctx: &CaptureContext,
        trigger: Trigger,
    ) -> Result<()> {
        host.notify_capture_started(config.feedback);
        host.next_frame().await;

        if self.capturing.swap(true, Ordering::SeqCst) {
            error!(
                "Capture requested for {} while a previous capture is still running. \
                 Proceeding, but output for one of the two may be missing or wrong.",
                self.surface
            );
        }

        let snapshot = host.snapshot_view();
        host.prepare_view(
            &self.surface,
            OverlayVisibility::all_visible().masked(config.render_zones, config.render_overlays),
        );

        let job = self.resolve_job(config, state, ctx, trigger);
        let camera = camera_frame(&job.region);
        debug!(
            "Capture region for {} resolved: {} at {}x{}",
            self.surface, job.region, job.width, job.height
        );

        // Pixels only become readable on the frame after the view changed
        host.next_frame().await;

        if config.render_weather {
            host.draw_weather();
        }
        let pixels = match host.render(&camera, job.width, job.height) {
            Ok(buffer) => Some(buffer),
            Err(e) => {
                error!("Render failed for {}: {}", self.surface, e);
                None
            }
        };

        // Restoration is unconditional; a failed render must not leave the
        // camera, overlays or active surface corrupted
        host.restore_view(snapshot);
        self.capturing.store(false, Ordering::SeqCst);
        host.dismiss_capture_notice();

        host.next_frame().await;

        let Some(pixels) = pixels else {
            return Ok(());
        };

        self.handoff(config, state, ctx, trigger, job, pixels).await;
        Ok(())
    }

    /// Snapshot everything this capture attempt needs
    fn resolve_job(
        &self,
        config: &CaptureConfig,
        state: &mut SurfaceState,
        ctx: &CaptureContext,
        trigger: Trigger,
    ) -> CaptureJob {
        let manual = trigger.is_manual();
        let force_full = matches!(
            trigger,
            Trigger::Manual {
                force_full_extent: true
            }
        );
        let requested = if force_full {
            CaptureRegion::full(ctx.extent)
        } else {
            region_from_markers(&ctx.corner_markers, ctx.extent)
        };
        let region = state
            .smoothing
            .compute(requested, manual, config.smoothing_steps);
        let (width, height) = pixel_dimensions(&region, config.sizing);
        CaptureJob {
            region,
            width,
            height,
            manually_triggered: manual,
            full_extent_override: force_full,
        }
    }

    /// Hand the framebuffer to the encode pipeline
    ///
    /// Waits for any previous encode first so at most one encode runs at a
    /// time, then transfers buffer ownership to a blocking worker.
    async fn handoff(
        &mut self,
        config: &CaptureConfig,
        state: &SurfaceState,
        ctx: &CaptureContext,
        trigger: Trigger,
        job: CaptureJob,
        pixels: PixelBuffer,
    ) {
        if let Some(task) = self.encode_task.take() {
            if !task.is_finished() {
                debug!("Waiting for previous encode of {} to finish", self.surface);
            }
            if let Err(e) = task.await {
                error!("Previous encode task panicked: {}", e);
            }
        }

        let counter = match trigger {
            Trigger::Scheduled { counter } => counter,
            Trigger::Manual { .. } => state.schedule.fired_count,
        };
        let request = EncodeRequest {
            pixels,
            format: config.format,
            quality: config.quality,
            naming: config.naming,
            manually_triggered: job.manually_triggered,
            context: NamingContext {
                base: config.export_path.clone(),
                world_seed: ctx.world_seed.clone(),
                surface_label: ctx.surface_label.clone(),
                per_world_subdir: config.per_world_subdir,
                date: WorldDate::at(ctx.ticks, ctx.longitude),
                counter,
                extension: config.format.extension(),
            },
        };

        let pipeline = self.pipeline.clone();
        let surface = self.surface.clone();
        self.encode_task = Some(tokio::task::spawn_blocking(move || {
            match pipeline.encode(request) {
                Ok(path) => {
                    info!("Capture of {} written to {}", surface, path.display());
                    Some(path)
                }
                Err(e) => {
                    error!("Encode for {} failed: {}", surface, e);
                    None
                }
            }
        }));
    }

    /// Wait for a pending encode to finish
    ///
    /// Returns the path of the capture it wrote, if any. Intended for
    /// shutdown paths and tests; the steady-state pipeline never needs it.
    pub async fn finish(&mut self) -> Option<std::path::PathBuf> {
        match self.encode_task.take() {
            Some(task) => task.await.ok().flatten(),
            None => None,
        }
    }
}
