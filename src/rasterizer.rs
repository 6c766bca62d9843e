//! NDC-to-viewport mapping, edge-function triangle setup, incremental
//! inside test, and the depth test.

use crate::algebra::{orient2d, Vec2, Vec3};
use crate::buffer::{Color, ColorBuffer, DepthBuffer};
use crate::projection::ProjectedTriangle;
use crate::shader::Shader;

fn viewport_coords(clip: &crate::algebra::Vec4, width: usize, height: usize) -> (f64, f64) {
    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    let sx = (ndc_x + 1.0) * 0.5 * (width as f64 - 1.0);
    let sy = (ndc_y + 1.0) * 0.5 * (height as f64 - 1.0);
    (sx.round(), sy.round())
}

/// Rasterizes a single clipped, view+clip-space triangle into the color and
/// depth buffers, invoking `shader` once per covered pixel that passes the
/// depth test.
pub fn rasterize_triangle(
    triangle: &ProjectedTriangle,
    shader: &dyn Shader,
    light_view: Vec3,
    color: &mut ColorBuffer,
    depth: &mut DepthBuffer,
) {
    let width = color.width;
    let height = color.height;

    let mut screen = [Vec2::zeros(); 3];
    for i in 0..3 {
        let (sx, sy) = viewport_coords(&triangle.clip_vert[i], width, height);
        screen[i] = Vec2::new(sx, sy);
    }

    let min_x = screen.iter().map(|p| p.x).fold(f64::MAX, f64::min).max(0.0) as i64;
    let max_x = screen
        .iter()
        .map(|p| p.x)
        .fold(f64::MIN, f64::max)
        .min(width as f64 - 1.0) as i64;
    let min_y = screen.iter().map(|p| p.y).fold(f64::MAX, f64::min).max(0.0) as i64;
    let max_y = screen
        .iter()
        .map(|p| p.y)
        .fold(f64::MIN, f64::max)
        .min(height as f64 - 1.0) as i64;

    if min_x > max_x || min_y > max_y {
        return;
    }

    let area = orient2d(screen[0], screen[1], screen[2].x, screen[2].y);
    if area <= 0 {
        // Backface culling: triangle isn't CCW in screen space.
        return;
    }
    let inv_area = 1.0 / area as f64;

    let a01 = (screen[0].y - screen[1].y) as i64;
    let b01 = (screen[1].x - screen[0].x) as i64;
    let a12 = (screen[1].y - screen[2].y) as i64;
    let b12 = (screen[2].x - screen[1].x) as i64;
    let a20 = (screen[2].y - screen[0].y) as i64;
    let b20 = (screen[0].x - screen[2].x) as i64;

    let min_point = Vec2::new(min_x as f64, min_y as f64);
    let mut w0_row = orient2d(screen[1], screen[2], min_point.x, min_point.y);
    let mut w1_row = orient2d(screen[2], screen[0], min_point.x, min_point.y);
    let mut w2_row = orient2d(screen[0], screen[1], min_point.x, min_point.y);

    for y in min_y..=max_y {
        let mut w0 = w0_row;
        let mut w1 = w1_row;
        let mut w2 = w2_row;

        for x in min_x..=max_x {
            if (w0 | w1 | w2) >= 0 {
                let l0 = w0 as f64 * inv_area;
                let l1 = w1 as f64 * inv_area;
                let l2 = w2 as f64 * inv_area;

                let inv_z = l0 / triangle.view_vert[0].z
                    + l1 / triangle.view_vert[1].z
                    + l2 / triangle.view_vert[2].z;
                let z = 1.0 / inv_z;

                let (px, py) = (x as usize, y as usize);
                if z < 0.0 && z > depth.get(px, py) {
                    depth.set(px, py, z);
                    let (r, g, b) = shader.shade(light_view, triangle, [l0, l1, l2], z);
                    color.set_pixel(px, py, Color::rgb(r, g, b));
                }
            }

            w0 += a12;
            w1 += a20;
            w2 += a01;
        }

        w0_row += b12;
        w1_row += b20;
        w2_row += b01;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::Vec4;
    use crate::buffer::DEPTH_SENTINEL;
    use crate::shader::FlatShader;

    fn front_facing_triangle() -> ProjectedTriangle {
        // Screen-space CCW triangle covering most of a small buffer, all
        // vertices at the same view-space depth.
        ProjectedTriangle {
            view_vert: [Vec3::new(0.0, 0.0, -2.0); 3],
            clip_vert: [
                Vec4::new(-0.9, -0.9, 0.0, 1.0),
                Vec4::new(0.9, -0.9, 0.0, 1.0),
                Vec4::new(0.0, 0.9, 0.0, 1.0),
            ],
            view_normal: [Vec3::new(0.0, 0.0, 1.0); 3],
            uv: [Vec3::zeros(); 3],
            light_intensity: [1.0; 3],
        }
    }

    #[test]
    fn covered_pixels_get_shaded_and_uncovered_stay_clear() {
        let triangle = front_facing_triangle();
        let shader = FlatShader::new(200, 100, 50);
        let mut color = ColorBuffer::new(20, 20);
        let mut depth = DepthBuffer::new(20, 20);

        rasterize_triangle(&triangle, &shader, Vec3::zeros(), &mut color, &mut depth);

        // Corner pixel should remain the clear color.
        let bytes = color.as_bytes();
        assert_eq!(&bytes[0..3], &[0, 0, 0]);

        // Some pixel in the interior was written.
        let wrote_something = bytes.chunks_exact(4).any(|px| px[0] == 200 && px[1] == 100 && px[2] == 50);
        assert!(wrote_something);
    }

    #[test]
    fn backfacing_triangle_is_culled() {
        let mut triangle = front_facing_triangle();
        triangle.clip_vert.swap(1, 2); // flip winding to clockwise
        let shader = FlatShader::new(200, 100, 50);
        let mut color = ColorBuffer::new(20, 20);
        let mut depth = DepthBuffer::new(20, 20);

        rasterize_triangle(&triangle, &shader, Vec3::zeros(), &mut color, &mut depth);

        assert!(color.as_bytes().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
        assert_eq!(depth.get(5, 5), DEPTH_SENTINEL);
    }

    #[test]
    fn nearer_fragment_overwrites_farther_one() {
        let shader = FlatShader::new(1, 1, 1);
        let mut color = ColorBuffer::new(10, 10);
        let mut depth = DepthBuffer::new(10, 10);

        let mut far = front_facing_triangle();
        far.view_vert = [Vec3::new(0.0, 0.0, -5.0); 3];
        rasterize_triangle(&far, &shader, Vec3::zeros(), &mut color, &mut depth);
        let far_depth = depth.get(5, 3);

        let mut near = front_facing_triangle();
        near.view_vert = [Vec3::new(0.0, 0.0, -1.0); 3];
        rasterize_triangle(&near, &shader, Vec3::zeros(), &mut color, &mut depth);
        let near_depth = depth.get(5, 3);

        assert!(near_depth > far_depth);
    }
}
