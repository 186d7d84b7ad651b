//! Projection and model matrices for the pixel-space passes.

use glam::{Mat4, Vec3};
use winit::dpi::PhysicalSize;

use crate::input::BrushStroke;

/// Top-left-origin orthographic projection over the surface's pixel grid.
///
/// Pixel (0, 0) maps to NDC (-1, +1); pixel (w, h) to (+1, -1). Depth is
/// unused, the near/far range just has to contain z = 0.
pub fn pixel_ortho(surface: PhysicalSize<u32>) -> Mat4 {
    Mat4::orthographic_rh(
        0.0,
        surface.width.max(1) as f32,
        surface.height.max(1) as f32,
        0.0,
        -1.0,
        1.0,
    )
}

/// Transform for a brush stamp: unit quad rotated, scaled, and placed at
/// the stroke position in field pixels.
pub fn brush_matrix(surface: PhysicalSize<u32>, stroke: &BrushStroke) -> Mat4 {
    pixel_ortho(surface)
        * Mat4::from_translation(Vec3::new(stroke.position.x, stroke.position.y, 0.0))
        * Mat4::from_rotation_z(stroke.rotation)
        * Mat4::from_scale(Vec3::new(stroke.scale, stroke.scale, 1.0))
}

/// Transform placing the source image on the surface: centered, at 1:1
/// pixel scale (the unit quad spans half the image size per axis).
///
/// The render loop records this matrix each frame; the input mapper
/// inverts it to place strokes.
pub fn composite_matrix(surface: PhysicalSize<u32>, image_w: u32, image_h: u32) -> Mat4 {
    let w = surface.width.max(1) as f32;
    let h = surface.height.max(1) as f32;

    pixel_ortho(surface)
        * Mat4::from_translation(Vec3::new(w * 0.5, h * 0.5, 0.0))
        * Mat4::from_scale(Vec3::new(image_w as f32 * 0.5, image_h as f32 * 0.5, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    fn size(w: u32, h: u32) -> PhysicalSize<u32> {
        PhysicalSize::new(w, h)
    }

    fn project(m: Mat4, x: f32, y: f32) -> Vec2 {
        let p = m.project_point3(Vec3::new(x, y, 0.0));
        Vec2::new(p.x, p.y)
    }

    #[test]
    fn pixel_ortho_corners() {
        let m = pixel_ortho(size(800, 600));

        let tl = project(m, 0.0, 0.0);
        assert!((tl.x + 1.0).abs() < 1e-6);
        assert!((tl.y - 1.0).abs() < 1e-6);

        let br = project(m, 800.0, 600.0);
        assert!((br.x - 1.0).abs() < 1e-6);
        assert!((br.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn brush_matrix_centers_stamp_on_stroke() {
        let stroke = BrushStroke {
            position: Vec2::new(200.0, 150.0),
            rotation: 1.2,
            scale: 15.0,
            color: [0.0, 1.0, 0.0, 1.0],
        };
        let m = brush_matrix(size(800, 600), &stroke);

        // Quad-local origin lands where pixel (200, 150) would.
        let center = project(m, 0.0, 0.0);
        let expected = project(pixel_ortho(size(800, 600)), 200.0, 150.0);
        assert!((center.x - expected.x).abs() < 1e-6);
        assert!((center.y - expected.y).abs() < 1e-6);
    }

    #[test]
    fn brush_matrix_scale_sets_stamp_extent() {
        let stroke = BrushStroke {
            position: Vec2::new(100.0, 100.0),
            rotation: 0.0,
            scale: 10.0,
            color: [1.0; 4],
        };
        let surface = size(200, 200);
        let m = brush_matrix(surface, &stroke);

        // Unrotated, corner (1, 1) sits `scale` pixels from the center.
        let corner = project(m, 1.0, 1.0);
        let expected = project(pixel_ortho(surface), 110.0, 110.0);
        assert!((corner.x - expected.x).abs() < 1e-6);
        assert!((corner.y - expected.y).abs() < 1e-6);
    }

    #[test]
    fn composite_matrix_centers_image() {
        let m = composite_matrix(size(800, 600), 400, 300);

        // Quad center at surface center -> NDC origin.
        let c = project(m, 0.0, 0.0);
        assert!(c.x.abs() < 1e-6);
        assert!(c.y.abs() < 1e-6);

        // Quad corner (+1, +1) -> surface pixel (600, 450).
        let corner = project(m, 1.0, 1.0);
        let expected = project(pixel_ortho(size(800, 600)), 600.0, 450.0);
        assert!((corner.x - expected.x).abs() < 1e-6);
        assert!((corner.y - expected.y).abs() < 1e-6);
    }

    #[test]
    fn full_surface_image_spans_ndc() {
        let m = composite_matrix(size(640, 480), 640, 480);
        let corner = project(m, -1.0, -1.0);
        // Local (-1, -1) is the image's top-left on screen -> NDC (-1, +1).
        assert!((corner.x + 1.0).abs() < 1e-6);
        assert!((corner.y - 1.0).abs() < 1e-6);
    }
}
