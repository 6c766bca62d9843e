//! Wavefront OBJ loading into a [`Mesh`], extending the plain
//! position+normal load with UV coordinates.

use crate::algebra::Vec3;
use crate::error::{RenderError, Result};
use crate::mesh::{Mesh, Triangle};
use crate::shader::Shader;
use obj::{load_obj, ObjError, TexturedVertex};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Loads every triangle of an OBJ file's default object into one [`Mesh`].
/// `vt` coordinates are flipped on load (`v = 1 - file_v`) so `(0,0)` lands
/// at the texture's top-left the way the rest of the pipeline expects.
pub fn load_mesh(path: impl AsRef<Path>, shader: Box<dyn Shader>) -> Result<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| RenderError::ObjRead {
        path: path.to_path_buf(),
        source,
    })?;
    let input = BufReader::new(file);
    let obj: obj::Obj<TexturedVertex> =
        load_obj(input).map_err(|source: ObjError| RenderError::ObjParse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut triangles = Vec::with_capacity(obj.indices.len() / 3);
    for face in obj.indices.chunks_exact(3) {
        let verts: Vec<&TexturedVertex> = face.iter().map(|&i| &obj.vertices[i as usize]).collect();

        let world_position = [
            to_vec3(verts[0].position),
            to_vec3(verts[1].position),
            to_vec3(verts[2].position),
        ];
        let normal = [
            to_vec3(verts[0].normal).normalize(),
            to_vec3(verts[1].normal).normalize(),
            to_vec3(verts[2].normal).normalize(),
        ];
        let uv = [
            to_uv(verts[0].texture),
            to_uv(verts[1].texture),
            to_uv(verts[2].texture),
        ];

        triangles.push(Triangle::new(world_position, normal, uv));
    }

    if triangles.is_empty() {
        return Err(RenderError::EmptyMesh);
    }

    Ok(Mesh::new(triangles, shader))
}

fn to_vec3(p: [f32; 3]) -> Vec3 {
    Vec3::new(p[0] as f64, p[1] as f64, p[2] as f64)
}

fn to_uv(t: [f32; 3]) -> Vec3 {
    Vec3::new(t[0] as f64, 1.0 - t[1] as f64, 0.0)
}
