//! Capture-region smoothing
//!
//! When the user moves the region markers, an abrupt jump between two
//! capture windows looks jarring in the finished time-lapse. The smoother
//! fades the window from the old region to the new one across a configured
//! number of scheduled captures instead.

use serde::{Deserialize, Serialize};

use crate::types::CaptureRegion;

fn default_position() -> f32 {
    1.0
}

fn uninitialized_region() -> CaptureRegion {
    CaptureRegion::uninitialized()
}

/// Per-surface smoothing state, persisted across sessions
///
/// `position` is the blend factor in [0, 1]; 1 means fully converged on
/// `target`. Only [`SmoothingState::compute`] mutates this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingState {
    /// Region the smoother is fading away from
    #[serde(default = "uninitialized_region")]
    pub old: CaptureRegion,
    /// Region the smoother is converging on
    #[serde(default = "uninitialized_region")]
    pub target: CaptureRegion,
    /// Blend factor, 1 = converged
    #[serde(default = "default_position")]
    pub position: f32,
}

impl Default for SmoothingState {
    fn default() -> Self {
        Self {
            old: CaptureRegion::uninitialized(),
            target: CaptureRegion::uninitialized(),
            position: 1.0,
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl SmoothingState {
    /// Resolve the region to capture this cycle
    ///
    /// Manual captures are returned unmodified; smoothing only ever applies
    /// to the scheduled cadence. `steps = 0` degenerates to an immediate
    /// jump. The first-ever capture never smooths from the uninitialized
    /// sentinel.
    pub fn compute(
        &mut self,
        requested: CaptureRegion,
        manually_triggered: bool,
        steps: u32,
    ) -> CaptureRegion {
        if manually_triggered {
            return requested;
        }

        let step = 1.0 / (steps as f32 + 1.0);

        if requested != self.target {
            self.position = if self.target.is_uninitialized() {
                1.0
            } else {
                step
            };
            self.old = self.target;
            self.target = requested;
        }

        if self.position < 1.0 {
            let blended = CaptureRegion {
                start_x: lerp(self.old.start_x, self.target.start_x, self.position),
                start_z: lerp(self.old.start_z, self.target.start_z, self.position),
                end_x: lerp(self.old.end_x, self.target.end_x, self.position),
                end_z: lerp(self.old.end_z, self.target.end_z, self.position),
            };
            self.position += step;
            return blended;
        }

        self.target
    }
}
