//! Triangle/mesh model: world-space geometry owned by a [`Mesh`], with the
//! in-place affine transforms meshes are built and placed with.

use crate::algebra::{Mat4, Vec3};
use crate::shader::Shader;
use na::RowVector4;

/// A single triangle, exclusively owned by its [`Mesh`]. Per-vertex
/// attributes are stored as parallel arrays of length 3, indexed 0, 1, 2.
#[derive(Clone)]
pub struct Triangle {
    pub world_position: [Vec3; 3],
    pub normal: [Vec3; 3],
    pub uv: [Vec3; 3],
}

impl Triangle {
    pub fn new(world_position: [Vec3; 3], normal: [Vec3; 3], uv: [Vec3; 3]) -> Self {
        Triangle {
            world_position,
            normal,
            uv,
        }
    }
}

/// An ordered sequence of triangles plus the shader used to draw them.
/// Exclusively owned by the [`crate::scene::Scene`].
pub struct Mesh {
    pub triangles: Vec<Triangle>,
    pub shader: Box<dyn Shader>,
}

fn rotation_matrix(angle: Vec3) -> Mat4 {
    let rx = Mat4::from_rows(&[
        RowVector4::new(1.0, 0.0, 0.0, 0.0),
        RowVector4::new(0.0, angle.x.cos(), -angle.x.sin(), 0.0),
        RowVector4::new(0.0, angle.x.sin(), angle.x.cos(), 0.0),
        RowVector4::new(0.0, 0.0, 0.0, 1.0),
    ]);
    let ry = Mat4::from_rows(&[
        RowVector4::new(angle.y.cos(), 0.0, angle.y.sin(), 0.0),
        RowVector4::new(0.0, 1.0, 0.0, 0.0),
        RowVector4::new(-angle.y.sin(), 0.0, angle.y.cos(), 0.0),
        RowVector4::new(0.0, 0.0, 0.0, 1.0),
    ]);
    let rz = Mat4::from_rows(&[
        RowVector4::new(angle.z.cos(), -angle.z.sin(), 0.0, 0.0),
        RowVector4::new(angle.z.sin(), angle.z.cos(), 0.0, 0.0),
        RowVector4::new(0.0, 0.0, 1.0, 0.0),
        RowVector4::new(0.0, 0.0, 0.0, 1.0),
    ]);
    rz * ry * rx
}

fn transform_point(m: &Mat4, p: Vec3) -> Vec3 {
    let h = m * p.insert_row(3, 1.0);
    Vec3::new(h.x, h.y, h.z)
}

fn transform_direction(m: &Mat4, d: Vec3) -> Vec3 {
    let h = m * d.insert_row(3, 0.0);
    Vec3::new(h.x, h.y, h.z).normalize()
}

impl Mesh {
    pub fn new(triangles: Vec<Triangle>, shader: Box<dyn Shader>) -> Self {
        Mesh { triangles, shader }
    }

    /// Translates every vertex's world position by `delta`. Normals are
    /// unaffected (translation carries no rotational component).
    pub fn translate(&mut self, delta: Vec3) {
        for t in &mut self.triangles {
            for p in &mut t.world_position {
                *p += delta;
            }
        }
    }

    /// Rotates every vertex's world position and normal around the origin
    /// by the given Euler angles (radians, applied Z, then Y, then X).
    pub fn rotate(&mut self, angle: Vec3) {
        let m = rotation_matrix(angle);
        for t in &mut self.triangles {
            for p in &mut t.world_position {
                *p = transform_point(&m, *p);
            }
            for n in &mut t.normal {
                *n = transform_direction(&m, *n);
            }
        }
    }

    /// Scales every vertex's world position around the origin.
    pub fn scale(&mut self, factor: Vec3) {
        for t in &mut self.triangles {
            for p in &mut t.world_position {
                p.x *= factor.x;
                p.y *= factor.y;
                p.z *= factor.z;
            }
        }
    }

    /// Scales the u and v components of every vertex's UV mapping, leaving
    /// the unused third component untouched.
    pub fn scale_uv(&mut self, su: f64, sv: f64) {
        for t in &mut self.triangles {
            for uv in &mut t.uv {
                uv.x *= su;
                uv.y *= sv;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::FlatShader;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            [Vec3::new(0.0, 0.0, 1.0); 3],
            [Vec3::new(0.0, 0.0, 0.0); 3],
        )
    }

    #[test]
    fn translate_moves_positions_only() {
        let mut mesh = Mesh::new(vec![unit_triangle()], Box::new(FlatShader::new(0, 0, 0)));
        mesh.translate(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.triangles[0].world_position[0], Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.triangles[0].normal[0], Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn rotate_keeps_normals_unit_length() {
        let mut mesh = Mesh::new(vec![unit_triangle()], Box::new(FlatShader::new(0, 0, 0)));
        mesh.rotate(Vec3::new(0.3, 0.7, 1.1));
        for n in &mesh.triangles[0].normal {
            assert!((n.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn scale_uv_only_affects_u_and_v() {
        let mut t = unit_triangle();
        t.uv = [Vec3::new(1.0, 1.0, 7.0); 3];
        let mut mesh = Mesh::new(vec![t], Box::new(FlatShader::new(0, 0, 0)));
        mesh.scale_uv(2.0, 0.5);
        assert_eq!(mesh.triangles[0].uv[0], Vec3::new(2.0, 0.5, 7.0));
    }
}
