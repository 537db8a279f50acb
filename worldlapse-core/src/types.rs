//! Core types for Worldlapse
//!
//! These types represent the fundamental data structures used throughout
//! the trigger, capture and encode pipeline.

use serde::{Deserialize, Serialize};

/// Identifier for a capture surface (one world/map being snapshotted)
///
/// Persisted schedule and smoothing state is keyed by this id, so two
/// surfaces never share or race on each other's state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(String);

impl SurfaceId {
    /// Create a surface id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw id value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SurfaceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Integer world-grid cell, e.g. a user-placed corner marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub z: i32,
}

impl GridPoint {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

/// Size of a capture surface in world-grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub x: u32,
    pub z: u32,
}

impl SurfaceSize {
    pub fn new(x: u32, z: u32) -> Self {
        Self { x, z }
    }
}

/// Sentinel bound value marking a region as uninitialized
pub const REGION_UNSET: f32 = -1.0;

/// Rectangular capture area in world-grid units
///
/// Invariant: `end_x >= start_x` and `end_z >= start_z` for any region that
/// describes an actual capture. A region with all four bounds equal to
/// [`REGION_UNSET`] is the "never captured before" sentinel used by the
/// area smoother.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureRegion {
    pub start_x: f32,
    pub start_z: f32,
    pub end_x: f32,
    pub end_z: f32,
}

impl CaptureRegion {
    /// Create a region from explicit bounds
    pub fn new(start_x: f32, start_z: f32, end_x: f32, end_z: f32) -> Self {
        Self {
            start_x,
            start_z,
            end_x,
            end_z,
        }
    }

    /// The full extent of a surface
    pub fn full(extent: SurfaceSize) -> Self {
        Self {
            start_x: 0.0,
            start_z: 0.0,
            end_x: extent.x as f32,
            end_z: extent.z as f32,
        }
    }

    /// The uninitialized sentinel region
    pub fn uninitialized() -> Self {
        Self {
            start_x: REGION_UNSET,
            start_z: REGION_UNSET,
            end_x: REGION_UNSET,
            end_z: REGION_UNSET,
        }
    }

    /// Whether this region is the uninitialized sentinel
    pub fn is_uninitialized(&self) -> bool {
        self.start_x == REGION_UNSET
            && self.start_z == REGION_UNSET
            && self.end_x == REGION_UNSET
            && self.end_z == REGION_UNSET
    }

    /// Extent along the X axis
    pub fn width(&self) -> f32 {
        self.end_x - self.start_x
    }

    /// Extent along the Z axis
    pub fn depth(&self) -> f32 {
        self.end_z - self.start_z
    }
}

impl std::fmt::Display for CaptureRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {})-({}, {})",
            self.start_x, self.start_z, self.end_x, self.end_z
        )
    }
}

/// Visibility flags for the optional world overlays a capture may suppress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayVisibility {
    pub zones: bool,
    pub roof: bool,
    pub fertility: bool,
    pub terrain_affordance: bool,
    pub pollution: bool,
    pub temperature: bool,
}

impl OverlayVisibility {
    /// All overlays visible
    pub fn all_visible() -> Self {
        Self {
            zones: true,
            roof: true,
            fertility: true,
            terrain_affordance: true,
            pollution: true,
            temperature: true,
        }
    }

    /// Apply the capture configuration's suppression flags
    ///
    /// Zones are toggled on their own; the remaining overlays are
    /// suppressed as a group.
    pub fn masked(mut self, render_zones: bool, render_overlays: bool) -> Self {
        if !render_zones {
            self.zones = false;
        }
        if !render_overlays {
            self.roof = false;
            self.fertility = false;
            self.terrain_affordance = false;
            self.pollution = false;
            self.temperature = false;
        }
        self
    }
}

/// Raw RGB8 framebuffer returned by the renderer
///
/// Ownership transfers wholly to the encode pipeline at handoff; nothing
/// touches the buffer afterwards.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Interleaved RGB bytes, `width * height * 3` long
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from raw RGB bytes
    pub fn rgb(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Expected byte length for the buffer's dimensions
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

/// Orthographic camera placement handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// Camera position, X in world-grid units
    pub x: f32,
    /// Camera elevation above the surface
    pub y: f32,
    /// Camera position, Z in world-grid units
    pub z: f32,
    /// Half the vertical extent of the view volume
    pub ortho_half_height: f32,
    /// Far clip plane distance
    pub far_clip: f32,
}

/// Everything a single capture attempt needs, snapshotted at trigger time
///
/// Created fresh per trigger and consumed once; never reused.
#[derive(Debug, Clone)]
pub struct CaptureJob {
    /// Resolved (possibly smoothed) region for this cycle
    pub region: CaptureRegion,
    /// Target image width in pixels
    pub width: u32,
    /// Target image height in pixels
    pub height: u32,
    /// Whether a user requested this capture on demand
    pub manually_triggered: bool,
    /// Whether corner markers were ignored in favor of the full surface
    pub full_extent_override: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_extents() {
        let region = CaptureRegion::new(2.0, 3.0, 10.0, 7.0);
        assert_eq!(region.width(), 8.0);
        assert_eq!(region.depth(), 4.0);
    }

    #[test]
    fn test_region_sentinel() {
        assert!(CaptureRegion::uninitialized().is_uninitialized());
        assert!(!CaptureRegion::new(0.0, 0.0, 1.0, 1.0).is_uninitialized());
        // A single live bound is enough to leave the sentinel state
        assert!(!CaptureRegion::new(-1.0, -1.0, -1.0, 5.0).is_uninitialized());
    }

    #[test]
    fn test_full_region_matches_extent() {
        let region = CaptureRegion::full(SurfaceSize::new(250, 200));
        assert_eq!(region.start_x, 0.0);
        assert_eq!(region.end_x, 250.0);
        assert_eq!(region.end_z, 200.0);
    }

    #[test]
    fn test_overlay_mask_groups() {
        let all = OverlayVisibility::all_visible();

        let zones_only = all.masked(true, false);
        assert!(zones_only.zones);
        assert!(!zones_only.roof);
        assert!(!zones_only.temperature);

        let untouched = all.masked(true, true);
        assert_eq!(untouched, all);

        let none = all.masked(false, false);
        assert!(!none.zones);
        assert!(!none.fertility);
    }

    #[test]
    fn test_pixel_buffer_expected_len() {
        let buf = PixelBuffer::rgb(4, 2, vec![0; 24]);
        assert_eq!(buf.expected_len(), 24);
        assert_eq!(buf.data.len(), buf.expected_len());
    }
}
