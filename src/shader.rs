//! Per-covered-pixel color computation.
//!
//! `Shader` is invoked once per covered pixel by the rasterizer with the
//! barycentric weights and recovered depth for that pixel; it has no access
//! to the rest of the scene beyond the light position already projected
//! into camera space for this frame.

use crate::algebra::{ponderate, Vec3};
use crate::projection::ProjectedTriangle;
use crate::texture::Texture;

const AMBIENT: f64 = 0.4;
const LINE_THICKNESS: f64 = 0.02;

fn clamp_channel(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

/// Computes a per-pixel color for a covered fragment.
pub trait Shader: Send + Sync {
    fn shade(&self, light_view: Vec3, triangle: &ProjectedTriangle, l: [f64; 3], z: f64) -> (u8, u8, u8);
}

/// Returns a fixed RGB triplet regardless of position.
pub struct FlatShader {
    color: (u8, u8, u8),
}

impl FlatShader {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        FlatShader { color: (r, g, b) }
    }
}

impl Shader for FlatShader {
    fn shade(&self, _light_view: Vec3, _triangle: &ProjectedTriangle, _l: [f64; 3], _z: f64) -> (u8, u8, u8) {
        self.color
    }
}

/// Visualizes barycentric coordinates directly as color.
pub struct IntensityShader;

impl Shader for IntensityShader {
    fn shade(&self, _light_view: Vec3, _triangle: &ProjectedTriangle, l: [f64; 3], _z: f64) -> (u8, u8, u8) {
        (
            clamp_channel(l[0] * 255.0),
            clamp_channel(l[1] * 255.0),
            clamp_channel(l[2] * 255.0),
        )
    }
}

/// Wireframe shader: pixels near an edge (any barycentric weight below
/// `thickness`) get the line color, everything else gets the fill color.
pub struct LineShader {
    thickness: f64,
    line_color: (u8, u8, u8),
    fill_color: (u8, u8, u8),
}

impl LineShader {
    pub fn new(line_color: (u8, u8, u8), fill_color: (u8, u8, u8)) -> Self {
        LineShader {
            thickness: LINE_THICKNESS,
            line_color,
            fill_color,
        }
    }
}

impl Shader for LineShader {
    fn shade(&self, _light_view: Vec3, _triangle: &ProjectedTriangle, l: [f64; 3], _z: f64) -> (u8, u8, u8) {
        if l.iter().any(|&li| li < self.thickness) {
            self.line_color
        } else {
            self.fill_color
        }
    }
}

/// Per-pixel diffuse shading using the light intensity precomputed (and
/// linearly interpolated through clipping) at each vertex, plus a flat
/// ambient term.
pub struct SmoothColorShader {
    color: (f64, f64, f64),
}

impl SmoothColorShader {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        SmoothColorShader {
            color: (r as f64, g as f64, b as f64),
        }
    }
}

impl Shader for SmoothColorShader {
    fn shade(&self, _light_view: Vec3, triangle: &ProjectedTriangle, l: [f64; 3], _z: f64) -> (u8, u8, u8) {
        let intensity = ponderate(triangle.light_intensity, l) + AMBIENT;
        (
            clamp_channel(intensity * self.color.0),
            clamp_channel(intensity * self.color.1),
            clamp_channel(intensity * self.color.2),
        )
    }
}

/// Perspective-correct, nearest-neighbor textured shader. `u/z`, `v/z` are
/// interpolated linearly across the rasterized triangle and then multiplied
/// by the recovered per-pixel depth `z`, recovering the true `(u, v)`.
pub struct TextureShader {
    texture: Texture,
}

impl TextureShader {
    pub fn new(texture: Texture) -> Self {
        TextureShader { texture }
    }
}

impl Shader for TextureShader {
    fn shade(&self, _light_view: Vec3, triangle: &ProjectedTriangle, l: [f64; 3], z: f64) -> (u8, u8, u8) {
        let mut u_over_z = 0.0;
        let mut v_over_z = 0.0;
        for i in 0..3 {
            let inv_z = 1.0 / triangle.view_vert[i].z;
            u_over_z += triangle.uv[i].x * inv_z * l[i];
            v_over_z += triangle.uv[i].y * inv_z * l[i];
        }
        let u = u_over_z * z;
        let v = v_over_z * z;

        let (r, g, b) = self.texture.sample(u, v);
        let intensity = ponderate(triangle.light_intensity, l);
        (
            clamp_channel(r as f64 * intensity),
            clamp_channel(g as f64 * intensity),
            clamp_channel(b as f64 * intensity),
        )
    }
}
