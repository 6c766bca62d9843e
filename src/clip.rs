//! Homogeneous-space Sutherland-Hodgman clipping against the six canonical
//! clip planes, faithfully ported from the original engine's `clipTriangle`.

use crate::algebra::lerp;
use crate::projection::ProjectedTriangle;

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;
const FRONT: u8 = 16;
const BACK: u8 = 32;

const PLANES: [u8; 6] = [LEFT, RIGHT, TOP, BOTTOM, FRONT, BACK];

fn out_code(triangle: &ProjectedTriangle, vertex_idx: usize) -> u8 {
    let v = triangle.clip_vert[vertex_idx];
    let mut code = INSIDE;
    if v.x < -v.w {
        code |= LEFT;
    }
    if v.x > v.w {
        code |= RIGHT;
    }
    if v.y < -v.w {
        code |= BOTTOM;
    }
    if v.y > v.w {
        code |= TOP;
    }
    if v.z < -v.w {
        code |= FRONT;
    }
    if v.z > v.w {
        code |= BACK;
    }
    code
}

/// Intersection parameter `t` along the edge `idx0 -> idx1` against `plane`,
/// in the standard homogeneous form (e.g. for TOP:
/// `t = (y0-w0) / ((y0-w0) - (y1-w1))`).
fn find_t(triangle: &ProjectedTriangle, idx0: usize, idx1: usize, plane: u8) -> f64 {
    let a = triangle.clip_vert[idx0];
    let b = triangle.clip_vert[idx1];
    let t = match plane {
        LEFT => (a.x + a.w) / ((a.x + a.w) - (b.x + b.w)),
        RIGHT => (a.x - a.w) / ((a.x - a.w) - (b.x - b.w)),
        TOP => (a.y - a.w) / ((a.y - a.w) - (b.y - b.w)),
        BOTTOM => (a.y + a.w) / ((a.y + a.w) - (b.y + b.w)),
        FRONT => (a.z + a.w) / ((a.z + a.w) - (b.z + b.w)),
        BACK => (a.z - a.w) / ((a.z - a.w) - (b.z - b.w)),
        _ => 0.0,
    };
    debug_assert!(t.is_finite(), "clip intersection parameter is not finite");
    t.clamp(0.0, 1.0)
}

fn lerp_vertex(t: &ProjectedTriangle, from: usize, to: usize, t_param: f64) -> ProjectedTriangleVertex {
    ProjectedTriangleVertex {
        view_vert: lerp(t.view_vert[from], t.view_vert[to], t_param),
        clip_vert: lerp(t.clip_vert[from], t.clip_vert[to], t_param),
        view_normal: lerp(t.view_normal[from], t.view_normal[to], t_param),
        uv: lerp(t.uv[from], t.uv[to], t_param),
        light_intensity: lerp(t.light_intensity[from], t.light_intensity[to], t_param),
    }
}

#[derive(Clone, Copy)]
struct ProjectedTriangleVertex {
    view_vert: crate::algebra::Vec3,
    clip_vert: crate::algebra::Vec4,
    view_normal: crate::algebra::Vec3,
    uv: crate::algebra::Vec3,
    light_intensity: f64,
}

fn vertex_at(t: &ProjectedTriangle, idx: usize) -> ProjectedTriangleVertex {
    ProjectedTriangleVertex {
        view_vert: t.view_vert[idx],
        clip_vert: t.clip_vert[idx],
        view_normal: t.view_normal[idx],
        uv: t.uv[idx],
        light_intensity: t.light_intensity[idx],
    }
}

fn assemble(v0: ProjectedTriangleVertex, v1: ProjectedTriangleVertex, v2: ProjectedTriangleVertex) -> ProjectedTriangle {
    ProjectedTriangle {
        view_vert: [v0.view_vert, v1.view_vert, v2.view_vert],
        clip_vert: [v0.clip_vert, v1.clip_vert, v2.clip_vert],
        view_normal: [v0.view_normal, v1.view_normal, v2.view_normal],
        uv: [v0.uv, v1.uv, v2.uv],
        light_intensity: [v0.light_intensity, v1.light_intensity, v2.light_intensity],
    }
}

/// One vertex inside the plane: emits a single triangle clipped down to the
/// inside vertex and the two edge intersections.
fn clip_one_vertex_inside(triangle: &ProjectedTriangle, plane: u8, inside: usize) -> ProjectedTriangle {
    let next = (inside + 1) % 3;
    let other = (inside + 2) % 3;
    let t1 = find_t(triangle, inside, next, plane);
    let t2 = find_t(triangle, inside, other, plane);

    let a = lerp_vertex(triangle, next, inside, t1);
    let b = lerp_vertex(triangle, other, inside, t2);
    let c = vertex_at(triangle, inside);
    assemble(a, b, c)
}

/// Two vertices inside the plane: the clipped quad is split into two
/// triangles `(A, N, X)` and `(B, A, X)`, where `N`/`X` are the two inside
/// vertices and `A`/`B` are the edge intersections with the outside vertex.
fn clip_two_vertex_inside(triangle: &ProjectedTriangle, plane: u8, outside: usize) -> (ProjectedTriangle, ProjectedTriangle) {
    let next = (outside + 1) % 3;
    let other = (outside + 2) % 3;
    let t1 = find_t(triangle, outside, next, plane);
    let t2 = find_t(triangle, outside, other, plane);

    let a = lerp_vertex(triangle, next, outside, t1);
    let b = lerp_vertex(triangle, other, outside, t2);
    let n = vertex_at(triangle, next);
    let x = vertex_at(triangle, other);

    let triangle1 = assemble(a, n, x);
    let triangle2 = assemble(b, a, x);
    (triangle1, triangle2)
}

fn inside_vertex(codes: [u8; 3], plane: u8) -> Option<usize> {
    codes.iter().position(|&c| c & plane == 0)
}

fn outside_vertex(codes: [u8; 3], plane: u8) -> Option<usize> {
    codes.iter().position(|&c| c & plane != 0)
}

/// Clips a single projected triangle against the canonical view frustum,
/// emitting zero or more triangles in view+clip space with interpolated
/// attributes. Every emitted triangle satisfies `-w <= x, y, z <= w`
/// componentwise for all three vertices (modulo floating-point epsilon).
pub fn clip_triangle(triangle: ProjectedTriangle) -> Vec<ProjectedTriangle> {
    let codes = [
        out_code(&triangle, 0),
        out_code(&triangle, 1),
        out_code(&triangle, 2),
    ];
    if codes[0] | codes[1] | codes[2] == INSIDE {
        return vec![triangle];
    }

    let mut projection = vec![triangle];
    for &plane in &PLANES {
        let mut plane_triangles = Vec::with_capacity(projection.len());

        for projected in &projection {
            let codes = [
                out_code(projected, 0),
                out_code(projected, 1),
                out_code(projected, 2),
            ];
            let inside_count = codes.iter().filter(|&&c| c & plane == 0).count();

            match inside_count {
                0 => continue,
                1 => {
                    let inside = inside_vertex(codes, plane).expect("one vertex inside");
                    plane_triangles.push(clip_one_vertex_inside(projected, plane, inside));
                }
                2 => {
                    let outside = outside_vertex(codes, plane).expect("one vertex outside");
                    let (t1, t2) = clip_two_vertex_inside(projected, plane, outside);
                    plane_triangles.push(t1);
                    plane_triangles.push(t2);
                }
                3 => plane_triangles.push(projected.clone()),
                _ => unreachable!(),
            }
        }

        projection = plane_triangles;
    }

    projection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::{Vec3, Vec4};

    fn triangle_from_clip_verts(verts: [Vec4; 3]) -> ProjectedTriangle {
        ProjectedTriangle {
            view_vert: [Vec3::zeros(); 3],
            clip_vert: verts,
            view_normal: [Vec3::new(0.0, 0.0, 1.0); 3],
            uv: [Vec3::zeros(); 3],
            light_intensity: [1.0; 3],
        }
    }

    #[test]
    fn fully_inside_triangle_passes_through_unchanged() {
        let t = triangle_from_clip_verts([
            Vec4::new(0.0, 1.0, 0.0, 1.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, -1.0, 0.0, 1.0),
        ]);
        let out = clip_triangle(t);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn one_vertex_outside_top_plane_yields_two_triangles() {
        let t = triangle_from_clip_verts([
            Vec4::new(0.0, 4.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
        ]);
        let out = clip_triangle(t);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn straddling_left_and_top_yields_two_triangles() {
        let t = triangle_from_clip_verts([
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 2.0, 0.0, 1.0),
            Vec4::new(-2.0, 0.0, 0.0, 1.0),
        ]);
        let out = clip_triangle(t);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn clipped_triangles_stay_within_homogeneous_bounds() {
        let t = triangle_from_clip_verts([
            Vec4::new(0.0, 4.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
        ]);
        let out = clip_triangle(t);
        let eps = 1e-9;
        for tri in &out {
            for v in &tri.clip_vert {
                assert!(v.x.abs() <= v.w.abs() + eps);
                assert!(v.y.abs() <= v.w.abs() + eps);
                assert!(v.z.abs() <= v.w.abs() + eps);
            }
        }
    }

    #[test]
    fn entirely_outside_triangle_is_rejected() {
        let t = triangle_from_clip_verts([
            Vec4::new(5.0, 5.0, 0.0, 1.0),
            Vec4::new(6.0, 5.0, 0.0, 1.0),
            Vec4::new(5.0, 6.0, 0.0, 1.0),
        ]);
        let out = clip_triangle(t);
        assert!(out.is_empty());
    }
}
