//! Per-frame projection: source [`Triangle`](crate::mesh::Triangle)s are
//! carried through view and projection space into a [`ProjectedTriangle`],
//! which is what the clipper and rasterizer operate on.

use crate::algebra::{Mat4, Vec3, Vec4};
use crate::mesh::Triangle;

/// A per-frame work unit produced by projection, consumed by the clipper
/// and rasterizer. Held as parallel 3-element arrays rather than three named
/// fields so the clipper can index by vertex number uniformly.
#[derive(Clone)]
pub struct ProjectedTriangle {
    /// Camera-space position, already perspective-divided by clip-space w.
    pub view_vert: [Vec3; 3],
    /// Clip-space homogeneous position, pre-divide.
    pub clip_vert: [Vec4; 3],
    /// Unit-length normal in camera space.
    pub view_normal: [Vec3; 3],
    /// Original UVs, untouched by projection.
    pub uv: [Vec3; 3],
    /// Diffuse scalar precomputed at projection time.
    pub light_intensity: [f64; 3],
}

fn to_vec4(p: Vec3, w: f64) -> Vec4 {
    Vec4::new(p.x, p.y, p.z, w)
}

/// Projects a single source triangle into view and clip space, computing
/// per-vertex diffuse light intensity along the way.
///
/// `projected_light` is the light position already transformed into camera
/// space for this frame.
pub fn project_triangle(
    triangle: &Triangle,
    view_matrix: &Mat4,
    projection_matrix: &Mat4,
    normal_matrix: &Mat4,
    projected_light: Vec3,
) -> ProjectedTriangle {
    let mut view_vert = [Vec3::zeros(); 3];
    let mut clip_vert = [Vec4::zeros(); 3];
    let mut view_normal = [Vec3::zeros(); 3];
    let mut light_intensity = [0.0; 3];

    for i in 0..3 {
        let view4 = view_matrix * to_vec4(triangle.world_position[i], 1.0);
        view_vert[i] = Vec3::new(view4.x, view4.y, view4.z) / view4.w;
        clip_vert[i] = projection_matrix * view4;

        // Homogeneous w = 0: normals are directions, not points.
        let n4 = normal_matrix * to_vec4(triangle.normal[i], 0.0);
        view_normal[i] = Vec3::new(n4.x, n4.y, n4.z).normalize();

        light_intensity[i] = 1.0 / (view_vert[i] - projected_light).norm();
    }

    ProjectedTriangle {
        view_vert,
        clip_vert,
        view_normal,
        uv: triangle.uv,
        light_intensity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::build_perspective_matrix;

    #[test]
    fn identity_view_and_projection_preserve_position_direction() {
        let triangle = Triangle::new(
            [
                Vec3::new(0.0, 0.0, -2.0),
                Vec3::new(1.0, 0.0, -2.0),
                Vec3::new(0.0, 1.0, -2.0),
            ],
            [Vec3::new(0.0, 0.0, 1.0); 3],
            [Vec3::zeros(); 3],
        );
        let view = Mat4::identity();
        let proj = build_perspective_matrix(0.1, 50.0, 60.0, 1.0);
        let nm = Mat4::identity();

        let pt = project_triangle(&triangle, &view, &proj, &nm, Vec3::new(0.0, 0.0, 10.0));
        for v in &pt.view_vert {
            assert!(v.z < 0.0);
        }
        for i in 0..3 {
            assert!((pt.view_vert[i] - triangle.world_position[i]).norm() < 1e-9);
        }
    }
}
