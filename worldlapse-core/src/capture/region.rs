//! Region resolution, output sizing and camera framing

use crate::config::SizingMode;
use crate::types::{CameraFrame, CaptureRegion, GridPoint, SurfaceSize};

/// Resolve the requested capture region from the user's corner markers
///
/// Two or more markers define the bounding rectangle of all marker cells,
/// inclusive, with the max side expanded by one unit so the marked cells
/// themselves are fully inside the region. Fewer than two markers means
/// the whole surface.
pub fn region_from_markers(markers: &[GridPoint], extent: SurfaceSize) -> CaptureRegion {
    if markers.len() < 2 {
        return CaptureRegion::full(extent);
    }

    let mut start_x = extent.x as f32;
    let mut start_z = extent.z as f32;
    let mut end_x = 0.0f32;
    let mut end_z = 0.0f32;
    for marker in markers {
        let x = marker.x as f32;
        let z = marker.z as f32;
        if x < start_x {
            start_x = x;
        }
        if z < start_z {
            start_z = z;
        }
        if x > end_x {
            end_x = x;
        }
        if z > end_z {
            end_z = z;
        }
    }

    CaptureRegion {
        start_x,
        start_z,
        end_x: end_x + 1.0,
        end_z: end_z + 1.0,
    }
}

/// Compute the output image dimensions for a region
///
/// Fixed-height sizing keeps the configured height and derives the width
/// proportionally from the region's aspect ratio.
pub fn pixel_dimensions(region: &CaptureRegion, sizing: SizingMode) -> (u32, u32) {
    match sizing {
        SizingMode::FixedHeight { height } => {
            let width = (height as f32 / region.depth() * region.width()) as u32;
            (width, height)
        }
        SizingMode::PixelsPerCell { pixels } => (
            (region.width() * pixels as f32) as u32,
            (region.depth() * pixels as f32) as u32,
        ),
    }
}

/// Compute the orthographic camera placement that frames a region
///
/// The camera sits over the region center with a half-height equal to half
/// the Z extent. The elevation curve and far-plane padding match the host
/// camera rig so nothing clips at either extreme of the zoom range.
pub fn camera_frame(region: &CaptureRegion) -> CameraFrame {
    let half_x = region.width() / 2.0;
    let half_z = region.depth() / 2.0;
    let ortho = half_z;
    let elevation = 15.0 + (ortho - 11.0) / 49.0 * 50.0;
    CameraFrame {
        x: region.start_x + half_x,
        y: elevation,
        z: region.start_z + half_z,
        ortho_half_height: ortho,
        far_clip: elevation + 6.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTENT: SurfaceSize = SurfaceSize { x: 250, z: 250 };

    #[test]
    fn test_two_markers_define_expanded_bounds() {
        let markers = [GridPoint::new(2, 2), GridPoint::new(5, 7)];
        let region = region_from_markers(&markers, EXTENT);
        assert_eq!(region, CaptureRegion::new(2.0, 2.0, 6.0, 8.0));
    }

    #[test]
    fn test_marker_order_is_irrelevant() {
        let a = region_from_markers(&[GridPoint::new(5, 7), GridPoint::new(2, 2)], EXTENT);
        let b = region_from_markers(&[GridPoint::new(2, 2), GridPoint::new(5, 7)], EXTENT);
        assert_eq!(a, b);
    }

    #[test]
    fn test_extra_markers_extend_the_rectangle() {
        let markers = [
            GridPoint::new(10, 10),
            GridPoint::new(20, 20),
            GridPoint::new(5, 30),
        ];
        let region = region_from_markers(&markers, EXTENT);
        assert_eq!(region, CaptureRegion::new(5.0, 10.0, 21.0, 31.0));
    }

    #[test]
    fn test_too_few_markers_fall_back_to_full_extent() {
        assert_eq!(
            region_from_markers(&[], EXTENT),
            CaptureRegion::full(EXTENT)
        );
        assert_eq!(
            region_from_markers(&[GridPoint::new(3, 3)], EXTENT),
            CaptureRegion::full(EXTENT)
        );
    }

    #[test]
    fn test_pixels_per_cell_dimensions() {
        let region = CaptureRegion::new(0.0, 0.0, 40.0, 30.0);
        let (w, h) = pixel_dimensions(&region, SizingMode::PixelsPerCell { pixels: 32 });
        assert_eq!((w, h), (1280, 960));
    }

    #[test]
    fn test_fixed_height_keeps_aspect_ratio() {
        let region = CaptureRegion::new(0.0, 0.0, 200.0, 100.0);
        let (w, h) = pixel_dimensions(&region, SizingMode::FixedHeight { height: 1080 });
        assert_eq!(h, 1080);
        assert_eq!(w, 2160);
    }

    #[test]
    fn test_camera_centered_on_region() {
        let region = CaptureRegion::new(10.0, 20.0, 50.0, 60.0);
        let frame = camera_frame(&region);
        assert_eq!(frame.x, 30.0);
        assert_eq!(frame.z, 40.0);
        assert_eq!(frame.ortho_half_height, 20.0);
        assert!(frame.far_clip > frame.y);
    }
}
