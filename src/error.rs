//! Fatal, scene-construction-time errors.
//!
//! Per-triangle pipeline anomalies (degenerate triangles, zero-w clip
//! vertices, out-of-range texture samples) are never represented here — they
//! are dropped or clamped inline during rendering, never propagated as a
//! `Result`. This enum only covers host I/O failures, which the core treats
//! as fatal and does not attempt to recover from.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to read OBJ file {path}: {source}")]
    ObjRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse OBJ file {path}: {source}")]
    ObjParse {
        path: PathBuf,
        #[source]
        source: obj::ObjError,
    },

    #[error("failed to decode texture {path}: {source}")]
    TextureDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("mesh has no triangles")]
    EmptyMesh,
}

pub type Result<T> = std::result::Result<T, RenderError>;
