//! View matrix construction and per-frame scene projection, plus the two
//! supported camera behaviors: a fixed look-at camera and a free-flying
//! first-person camera.

use crate::algebra::{normal_matrix, Mat4, Vec3, Vec4};
use crate::mesh::Mesh;
use crate::projection::{project_triangle, ProjectedTriangle};

/// Shared capability set for anything the scene can orbit its projection
/// around. Dispatched dynamically since a `Scene` picks its camera variant
/// at construction time and never needs to know which one it got.
pub trait Camera {
    fn compute_view_matrix(&self) -> Mat4;

    /// Projects every triangle of every mesh through this camera's view and
    /// a fixed projection matrix, returning one flat list of projected
    /// triangles (pre-clip).
    fn project_scene(
        &self,
        meshes: &[Mesh],
        projection_matrix: &Mat4,
        light_world: Vec3,
    ) -> Vec<ProjectedTriangle> {
        let view = self.compute_view_matrix();
        let nm = normal_matrix(&view);
        let light4 = view * Vec4::new(light_world.x, light_world.y, light_world.z, 1.0);
        let projected_light = Vec3::new(light4.x, light4.y, light4.z) / light4.w;

        let mut out = Vec::new();
        for mesh in meshes {
            for triangle in &mesh.triangles {
                out.push(project_triangle(
                    triangle,
                    &view,
                    projection_matrix,
                    &nm,
                    projected_light,
                ));
            }
        }
        out
    }

    /// Applies a world-space displacement to this camera's position.
    fn move_by(&mut self, delta: Vec3);

    /// Applies a yaw/pitch delta in radians. A no-op for cameras with no
    /// orientation of their own.
    fn rotate(&mut self, yaw_delta: f64, pitch_delta: f64);

    /// Rotates a movement vector expressed in the camera's local frame
    /// (x = strafe, y = up, z = forward) into world space.
    fn transform_input_movement(&self, local: Vec3) -> Vec3;

    fn position(&self) -> Vec3;
}

/// Always looks at a fixed target; orientation cannot be changed by input.
pub struct LookAtCamera {
    pub position: Vec3,
    pub target: Vec3,
}

impl LookAtCamera {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        LookAtCamera { position, target }
    }

    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let zaxis = (self.position - self.target).normalize();
        let xaxis = Vec3::new(0.0, 1.0, 0.0).cross(&zaxis).normalize();
        let yaxis = zaxis.cross(&xaxis);
        (xaxis, yaxis, zaxis)
    }
}

impl Camera for LookAtCamera {
    fn compute_view_matrix(&self) -> Mat4 {
        let (xaxis, yaxis, zaxis) = self.basis();
        #[rustfmt::skip]
        let m = Mat4::new(
            xaxis.x, yaxis.x, zaxis.x, 0.0,
            xaxis.y, yaxis.y, zaxis.y, 0.0,
            xaxis.z, yaxis.z, zaxis.z, 0.0,
            -xaxis.dot(&self.position), -yaxis.dot(&self.position), -zaxis.dot(&self.position), 1.0,
        );
        // `Mat4::new` takes row-major arguments; the view matrix above is
        // laid out so row i holds basis vector i plus its translation
        // term, so transpose to get the conventional column form.
        m.transpose()
    }

    fn move_by(&mut self, delta: Vec3) {
        self.position += delta;
    }

    fn rotate(&mut self, _yaw_delta: f64, _pitch_delta: f64) {}

    fn transform_input_movement(&self, local: Vec3) -> Vec3 {
        local
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

/// Free-flying camera driven by yaw and pitch, both in radians.
pub struct FirstPersonCamera {
    pub position: Vec3,
    pub yaw: f64,
    pub pitch: f64,
}

impl FirstPersonCamera {
    pub fn new(position: Vec3, yaw: f64, pitch: f64) -> Self {
        FirstPersonCamera { position, yaw, pitch }
    }

    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let (sin_p, cos_p) = self.pitch.sin_cos();
        let (sin_y, cos_y) = self.yaw.sin_cos();
        let xaxis = Vec3::new(cos_y, 0.0, -sin_y);
        let yaxis = Vec3::new(sin_y * sin_p, cos_p, cos_y * sin_p);
        let zaxis = Vec3::new(sin_y * cos_p, -sin_p, cos_p * cos_y);
        (xaxis, yaxis, zaxis)
    }
}

impl Camera for FirstPersonCamera {
    fn compute_view_matrix(&self) -> Mat4 {
        let (xaxis, yaxis, zaxis) = self.basis();
        #[rustfmt::skip]
        let m = Mat4::new(
            xaxis.x, yaxis.x, zaxis.x, 0.0,
            xaxis.y, yaxis.y, zaxis.y, 0.0,
            xaxis.z, yaxis.z, zaxis.z, 0.0,
            -xaxis.dot(&self.position), -yaxis.dot(&self.position), -zaxis.dot(&self.position), 1.0,
        );
        m.transpose()
    }

    fn move_by(&mut self, delta: Vec3) {
        self.position += delta;
    }

    fn rotate(&mut self, yaw_delta: f64, pitch_delta: f64) {
        self.yaw += yaw_delta;
        self.pitch += pitch_delta;
    }

    fn transform_input_movement(&self, local: Vec3) -> Vec3 {
        let (sin_y, cos_y) = self.yaw.sin_cos();
        let (sin_y90, cos_y90) = (self.yaw + std::f64::consts::FRAC_PI_2).sin_cos();
        Vec3::new(
            local.z * sin_y + local.x * sin_y90,
            local.y,
            local.z * cos_y + local.x * cos_y90,
        )
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_camera_from_positive_z_has_identity_like_basis() {
        let cam = LookAtCamera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::zeros());
        let view = cam.compute_view_matrix();
        let world_origin = view * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((world_origin.z - (-5.0)).abs() < 1e-9);
    }

    #[test]
    fn first_person_camera_at_zero_yaw_pitch_faces_negative_z() {
        let cam = FirstPersonCamera::new(Vec3::zeros(), 0.0, 0.0);
        let (xaxis, yaxis, zaxis) = cam.basis();
        assert!((xaxis - Vec3::new(1.0, 0.0, 0.0)).norm() < 1e-9);
        assert!((yaxis - Vec3::new(0.0, 1.0, 0.0)).norm() < 1e-9);
        assert!((zaxis - Vec3::new(0.0, 0.0, 1.0)).norm() < 1e-9);
    }

    #[test]
    fn transform_input_movement_rotates_forward_by_yaw() {
        let cam = FirstPersonCamera::new(Vec3::zeros(), std::f64::consts::FRAC_PI_2, 0.0);
        let forward = cam.transform_input_movement(Vec3::new(0.0, 0.0, 1.0));
        assert!((forward.x - 1.0).abs() < 1e-9);
        assert!(forward.z.abs() < 1e-9);
    }

    #[test]
    fn rotate_accumulates_yaw_and_pitch() {
        let mut cam = FirstPersonCamera::new(Vec3::zeros(), 0.0, 0.0);
        cam.rotate(0.1, -0.2);
        cam.rotate(0.1, -0.2);
        assert!((cam.yaw - 0.2).abs() < 1e-9);
        assert!((cam.pitch - (-0.4)).abs() < 1e-9);
    }
}
