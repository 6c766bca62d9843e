//! Decoded, read-only texture storage and nearest-neighbor sampling.
//!
//! Decoding itself is delegated to the `image` crate; the core only ever
//! sees a packed RGB byte buffer plus dimensions.

use crate::error::{RenderError, Result};
use std::path::Path;

pub struct Texture {
    width: usize,
    height: usize,
    /// Packed RGB, 3 bytes per texel, row-major.
    data: Vec<u8>,
}

impl Texture {
    /// Builds a texture directly from a packed RGB buffer, for synthetic
    /// textures (tests, procedurally generated content).
    pub fn from_rgb(width: usize, height: usize, data: Vec<u8>) -> Self {
        assert_eq!(data.len(), width * height * 3);
        Texture {
            width,
            height,
            data,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| RenderError::TextureDecode {
            path: path.to_path_buf(),
            source,
        })?;
        let rgb = img.to_rgb8();
        let (width, height) = (rgb.width() as usize, rgb.height() as usize);
        Ok(Texture {
            width,
            height,
            data: rgb.into_raw(),
        })
    }

    /// Nearest-neighbor sample at normalized coordinates `(u, v)`, wrapping
    /// by modulo in both directions. Never faults, even for wildly
    /// out-of-range or negative coordinates.
    pub fn sample(&self, u: f64, v: f64) -> (u8, u8, u8) {
        let x = wrap_index(u, self.width);
        let y = wrap_index(v, self.height);
        let idx = (y * self.width + x) * 3;
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }
}

fn wrap_index(coord: f64, dim: usize) -> usize {
    if dim == 0 {
        return 0;
    }
    let i = (coord * dim as f64).floor() as i64;
    i.rem_euclid(dim as i64) as usize
}
