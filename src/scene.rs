//! Scene: owns every mesh, obstacle, and buffer a frame touches, and
//! sequences the fixed input → project → render → present phase order.

use crate::algebra::{build_perspective_matrix, Mat4, Vec3};
use crate::buffer::{ColorBuffer, DepthBuffer};
use crate::camera::Camera;
use crate::clip::clip_triangle;
use crate::collision::{resolve_slide, Aabb};
use crate::mesh::Mesh;
use crate::rasterizer::rasterize_triangle;

pub struct Scene {
    pub meshes: Vec<Mesh>,
    pub obstacles: Vec<Aabb>,
    pub camera: Box<dyn Camera>,
    pub light_position: Vec3,
    projected_light: Vec3,
    projection_matrix: Mat4,
    color_buffer: ColorBuffer,
    depth_buffer: DepthBuffer,
    scale_factor: usize,
}

impl Scene {
    pub fn new(
        camera: Box<dyn Camera>,
        light_position: Vec3,
        internal_width: usize,
        internal_height: usize,
        scale_factor: usize,
        aspect_ratio: f64,
    ) -> Self {
        Scene {
            meshes: Vec::new(),
            obstacles: Vec::new(),
            camera,
            light_position,
            projected_light: Vec3::zeros(),
            projection_matrix: build_perspective_matrix(0.1, 50.0, 78.0, aspect_ratio),
            color_buffer: ColorBuffer::new(internal_width, internal_height),
            depth_buffer: DepthBuffer::new(internal_width, internal_height),
            scale_factor,
        }
    }

    pub fn add_mesh(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    pub fn add_obstacle(&mut self, obstacle: Aabb) {
        self.obstacles.push(obstacle);
    }

    /// Resolves a desired camera movement against every obstacle and
    /// applies the result, then rotates the camera by the given yaw/pitch
    /// deltas. Movement is expressed in the camera's local frame.
    pub fn move_camera(&mut self, local_movement: Vec3, yaw_delta: f64, pitch_delta: f64) {
        let world_movement = self.camera.transform_input_movement(local_movement);
        let resolved = resolve_slide(self.camera.position(), world_movement, &self.obstacles);
        self.camera.move_by(resolved);
        self.camera.rotate(yaw_delta, pitch_delta);
    }

    /// Projects every mesh's triangles through the camera, clips each one,
    /// and rasterizes the survivors into the color and depth buffers.
    pub fn render(&mut self) {
        self.color_buffer.clear();
        self.depth_buffer.clear();

        let view = self.camera.compute_view_matrix();
        let light4 = view * crate::algebra::Vec4::new(
            self.light_position.x,
            self.light_position.y,
            self.light_position.z,
            1.0,
        );
        self.projected_light = Vec3::new(light4.x, light4.y, light4.z) / light4.w;

        for mesh in &self.meshes {
            let projected = self.camera.project_scene(
                std::slice::from_ref(mesh),
                &self.projection_matrix,
                self.light_position,
            );
            for triangle in projected {
                for clipped in clip_triangle(triangle) {
                    rasterize_triangle(
                        &clipped,
                        mesh.shader.as_ref(),
                        self.projected_light,
                        &mut self.color_buffer,
                        &mut self.depth_buffer,
                    );
                }
            }
        }
    }

    /// Replicates each internal pixel into a `scale_factor`-sized block,
    /// ready to hand to a presentation surface at the full window resolution.
    pub fn present(&self) -> Vec<u32> {
        self.color_buffer.upscale_to_u32(self.scale_factor)
    }

    pub fn color_buffer(&self) -> &ColorBuffer {
        &self.color_buffer
    }

    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.depth_buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::LookAtCamera;
    use crate::geometry::xz_square;
    use crate::shader::FlatShader;

    #[test]
    fn rendering_a_ground_plane_writes_pixels_in_lower_half() {
        let camera = LookAtCamera::new(Vec3::new(0.0, 0.0, 4.0), Vec3::zeros());
        let mut scene = Scene::new(Box::new(camera), Vec3::new(0.0, 5.0, 5.0), 100, 100, 1, 1.0);

        let mut ground = xz_square(4.0, Box::new(FlatShader::new(128, 128, 128)));
        ground.translate(Vec3::new(0.0, -1.0, 0.0));
        scene.add_mesh(ground);

        scene.render();

        let bytes = scene.color_buffer().as_bytes();
        let mut lower_half_written = false;
        let mut upper_half_written = false;
        for y in 0..100 {
            for x in 0..100 {
                let idx = (y * 100 + x) * 4;
                let is_gray = bytes[idx] == 128 && bytes[idx + 1] == 128 && bytes[idx + 2] == 128;
                if is_gray {
                    if y >= 50 {
                        lower_half_written = true;
                    } else {
                        upper_half_written = true;
                    }
                }
            }
        }
        assert!(lower_half_written);
        assert!(!upper_half_written);
    }

    #[test]
    fn mesh_entirely_behind_camera_writes_no_pixels() {
        let camera = LookAtCamera::new(Vec3::new(0.0, 0.0, 4.0), Vec3::zeros());
        let mut scene = Scene::new(Box::new(camera), Vec3::new(0.0, 5.0, 5.0), 50, 50, 1, 1.0);

        let mut behind = xz_square(1.0, Box::new(FlatShader::new(200, 0, 0)));
        behind.translate(Vec3::new(0.0, 0.0, 10.0));
        scene.add_mesh(behind);

        scene.render();

        let bytes = scene.color_buffer().as_bytes();
        assert!(bytes.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    }
}
