use glam::{Mat4, Vec2, Vec3};
use winit::dpi::PhysicalSize;

/// Maps a cursor position to displacement-field pixel coordinates.
///
/// `pointer` is in the surface's backing (physical) pixels, which is also
/// the field's pixel grid. The position is lifted to NDC (Y up), pushed
/// through the inverse of the composite matrix into the image quad's local
/// [-1, 1] space, then rescaled back to field pixels with the Y axis
/// flipped (screen Y grows downward, quad local Y grows upward).
///
/// Returns `None` for a degenerate (non-invertible) matrix.
pub fn pointer_to_field(
    pointer: Vec2,
    surface: PhysicalSize<u32>,
    composite_matrix: Mat4,
) -> Option<Vec2> {
    let w = surface.width.max(1) as f32;
    let h = surface.height.max(1) as f32;

    let ndc = Vec3::new(
        pointer.x / w * 2.0 - 1.0,
        -(pointer.y / h * 2.0 - 1.0),
        0.0,
    );

    let inverse = composite_matrix.inverse();
    if !inverse.is_finite() {
        return None;
    }

    let local = inverse.project_point3(ndc);

    Some(Vec2::new(
        (local.x * 0.5 + 0.5) * w,
        (-local.y * 0.5 + 0.5) * h,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::transform::composite_matrix;

    fn size(w: u32, h: u32) -> PhysicalSize<u32> {
        PhysicalSize::new(w, h)
    }

    #[test]
    fn surface_center_maps_to_field_center() {
        let surface = size(800, 600);
        let mat = composite_matrix(surface, 400, 300);

        let p = pointer_to_field(Vec2::new(400.0, 300.0), surface, mat).unwrap();
        assert!((p.x - 400.0).abs() < 1e-3, "x = {}", p.x);
        assert!((p.y - 300.0).abs() < 1e-3, "y = {}", p.y);
    }

    #[test]
    fn image_corner_maps_through_quad_space() {
        // Image half the surface size, centered: its on-screen top-left
        // corner (200, 150) is quad-local (-1, -1), and the Y flip in the
        // rescale sends quad-local -1 to the field's far row.
        let surface = size(800, 600);
        let mat = composite_matrix(surface, 400, 300);

        let p = pointer_to_field(Vec2::new(200.0, 150.0), surface, mat).unwrap();
        assert!(p.x.abs() < 1e-3, "x = {}", p.x);
        assert!((p.y - 600.0).abs() < 1e-3, "y = {}", p.y);
    }

    #[test]
    fn full_surface_image_round_trips_x() {
        // With the image covering the surface exactly, quad space and NDC
        // coincide and the pointer's X maps back to itself.
        let surface = size(640, 480);
        let mat = composite_matrix(surface, 640, 480);

        for x in [0.0f32, 100.0, 320.0, 639.0] {
            let p = pointer_to_field(Vec2::new(x, 240.0), surface, mat).unwrap();
            assert!((p.x - x).abs() < 1e-2, "x {} -> {}", x, p.x);
        }
    }

    #[test]
    fn degenerate_matrix_yields_none() {
        let surface = size(640, 480);
        assert!(pointer_to_field(Vec2::new(1.0, 1.0), surface, Mat4::ZERO).is_none());
    }
}
