//! Primitive mesh builders, ported from the original engine's square/cube
//! generators. Useful for tests and for scenes that don't load an OBJ file.

use crate::algebra::Vec3;
use crate::mesh::{Mesh, Triangle};
use crate::shader::Shader;
use std::f64::consts::PI;

/// An axis-aligned square in the XZ plane, normal pointing +Y.
pub fn xz_square(size: f64, shader: Box<dyn Shader>) -> Mesh {
    let h = size / 2.0;
    let v0 = Vec3::new(-h, 0.0, -h);
    let v1 = Vec3::new(h, 0.0, -h);
    let v2 = Vec3::new(h, 0.0, h);
    let v3 = Vec3::new(-h, 0.0, h);
    let n = Vec3::new(0.0, 1.0, 0.0);

    let uv00 = Vec3::new(0.0, 0.0, 0.0);
    let uv10 = Vec3::new(0.999, 0.0, 0.0);
    let uv11 = Vec3::new(0.999, 0.999, 0.0);
    let uv01 = Vec3::new(0.0, 0.999, 0.0);

    let t0 = Triangle::new([v1, v0, v2], [n; 3], [uv10, uv00, uv11]);
    let t1 = Triangle::new([v3, v2, v0], [n; 3], [uv01, uv11, uv00]);

    Mesh::new(vec![t0, t1], shader)
}

/// An axis-aligned square in the XY plane, normal pointing +Z.
pub fn xy_square(size: f64, shader: Box<dyn Shader>) -> Mesh {
    let h = size / 2.0;
    let v0 = Vec3::new(-h, h, 0.0);
    let v1 = Vec3::new(-h, -h, 0.0);
    let v2 = Vec3::new(h, -h, 0.0);
    let v3 = Vec3::new(h, h, 0.0);
    let n = Vec3::new(0.0, 0.0, 1.0);

    let uv00 = Vec3::new(0.0, 0.999, 0.0);
    let uv10 = Vec3::new(0.0, 0.0, 0.0);
    let uv11 = Vec3::new(0.999, 0.0, 0.0);
    let uv01 = Vec3::new(0.999, 0.999, 0.0);

    let t0 = Triangle::new([v1, v2, v0], [n; 3], [uv10, uv11, uv00]);
    let t1 = Triangle::new([v3, v0, v2], [n; 3], [uv01, uv00, uv11]);

    Mesh::new(vec![t0, t1], shader)
}

/// An axis-aligned square in the YZ plane, normal pointing +X.
pub fn yz_square(size: f64, shader: Box<dyn Shader>) -> Mesh {
    let h = size / 2.0;
    let v0 = Vec3::new(0.0, h, -h);
    let v1 = Vec3::new(0.0, -h, -h);
    let v2 = Vec3::new(0.0, -h, h);
    let v3 = Vec3::new(0.0, h, h);
    let n = Vec3::new(1.0, 0.0, 0.0);

    let uv00 = Vec3::new(0.0, 0.999, 0.0);
    let uv10 = Vec3::new(0.0, 0.0, 0.0);
    let uv11 = Vec3::new(0.999, 0.0, 0.0);
    let uv01 = Vec3::new(0.999, 0.999, 0.0);

    let t0 = Triangle::new([v1, v2, v0], [n; 3], [uv10, uv11, uv00]);
    let t1 = Triangle::new([v3, v0, v2], [n; 3], [uv01, uv00, uv11]);

    Mesh::new(vec![t0, t1], shader)
}

/// A closed cube of the given side length, assembled from six squares.
/// Each face gets its own boxed shader instance (shaders hold no per-face
/// state here, so cloning the trait object isn't required).
pub fn cube<F>(size: f64, mut make_shader: F) -> Mesh
where
    F: FnMut() -> Box<dyn Shader>,
{
    let mut bottom = xz_square(size, make_shader());
    bottom.rotate(Vec3::new(PI, 0.0, 0.0));
    bottom.translate(Vec3::new(0.0, -size / 2.0, 0.0));

    let mut top = xz_square(size, make_shader());
    top.translate(Vec3::new(0.0, size / 2.0, 0.0));

    let mut right = yz_square(size, make_shader());
    right.rotate(Vec3::new(0.0, PI, 0.0));
    right.translate(Vec3::new(size / 2.0, 0.0, 0.0));

    let mut left = yz_square(size, make_shader());
    left.translate(Vec3::new(-size / 2.0, 0.0, 0.0));

    let mut back = xy_square(size, make_shader());
    back.rotate(Vec3::new(0.0, PI, 0.0));
    back.translate(Vec3::new(0.0, 0.0, -size / 2.0));

    let mut front = xy_square(size, make_shader());
    front.translate(Vec3::new(0.0, 0.0, size / 2.0));

    let mut triangles = Vec::new();
    for face in [bottom, top, right, left, back, front] {
        triangles.extend(face.triangles);
    }

    Mesh::new(triangles, make_shader())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::FlatShader;

    #[test]
    fn xz_square_has_two_triangles_with_upward_normal() {
        let mesh = xz_square(2.0, Box::new(FlatShader::new(255, 255, 255)));
        assert_eq!(mesh.triangles.len(), 2);
        for t in &mesh.triangles {
            for n in &t.normal {
                assert_eq!(*n, Vec3::new(0.0, 1.0, 0.0));
            }
        }
    }

    #[test]
    fn cube_has_twelve_triangles() {
        let mesh = cube(2.0, || Box::new(FlatShader::new(255, 255, 255)));
        assert_eq!(mesh.triangles.len(), 12);
    }
}
