extern crate nalgebra as na;

pub mod algebra;
pub mod buffer;
pub mod camera;
pub mod clip;
pub mod collision;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod obj_loader;
pub mod projection;
pub mod rasterizer;
pub mod scene;
pub mod shader;
pub mod texture;
