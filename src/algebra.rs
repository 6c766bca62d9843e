//! Linear algebra primitives.
//!
//! Vectors and matrices are thin aliases over `nalgebra` types rather than
//! hand-rolled structs — inverse, transpose, dot/cross and normalize are all
//! `nalgebra` operations. The free functions below are the few pieces the
//! rasterizer needs that don't already have a 1:1 `nalgebra` name.

use na::{Matrix4, Vector2, Vector3, Vector4};

pub type Vec2 = Vector2<f64>;
pub type Vec3 = Vector3<f64>;
pub type Vec4 = Vector4<f64>;
pub type Mat4 = Matrix4<f64>;

/// Signed area of the triangle formed by the directed edge `a -> b` and the
/// point `(x, y)`. Sign indicates which side of the edge the point lies on.
pub fn orient2d(a: Vec2, b: Vec2, x: f64, y: f64) -> i64 {
    (((b.x - a.x) * (y - a.y) - (b.y - a.y) * (x - a.x)) as i64)
}

/// Linear interpolation with `t` weighting the *first* argument:
/// `lerp(a, b, t) = t*a + (1-t)*b`. This is the convention the clipper uses
/// throughout; callers must not flip it.
pub fn lerp<T>(a: T, b: T, t: f64) -> T
where
    T: std::ops::Mul<f64, Output = T> + std::ops::Add<Output = T>,
{
    a * t + b * (1.0 - t)
}

/// Weighted combination of three values by barycentric weights `[l0, l1, l2]`.
pub fn ponderate<T>(pts: [T; 3], weights: [f64; 3]) -> T
where
    T: std::ops::Mul<f64, Output = T> + std::ops::Add<Output = T> + Copy,
{
    let [p0, p1, p2] = pts;
    let [w0, w1, w2] = weights;
    p0 * w0 + p1 * w1 + p2 * w2
}

/// Builds a standard OpenGL-convention perspective projection matrix
/// (right-handed, symmetric frustum) such that the visible region maps to
/// `|x|, |y|, |z| <= w` in clip space.
pub fn build_perspective_matrix(near: f64, far: f64, fov_y_deg: f64, aspect_ratio: f64) -> Mat4 {
    use na::RowVector4;

    let deg_to_rad = std::f64::consts::PI / 180.0;
    let size = near * (deg_to_rad * fov_y_deg / 2.0).tan();
    let l = -size;
    let r = size;
    let b = -size / aspect_ratio;
    let t = size / aspect_ratio;

    Mat4::from_rows(&[
        RowVector4::new(2.0 * near / (r - l), 0.0, (r + l) / (r - l), 0.0),
        RowVector4::new(0.0, 2.0 * near / (t - b), (t + b) / (t - b), 0.0),
        RowVector4::new(
            0.0,
            0.0,
            -(far + near) / (far - near),
            -(2.0 * far * near) / (far - near),
        ),
        RowVector4::new(0.0, 0.0, -1.0, 0.0),
    ])
}

/// Inverse-transpose of `m`, used to carry normals through non-uniform
/// transforms. Falls back to the identity if `m` is singular — this should
/// never happen for a well-formed view matrix, but guards against NaN
/// propagation from a degenerate camera configuration.
pub fn normal_matrix(m: &Mat4) -> Mat4 {
    m.try_inverse().unwrap_or_else(Mat4::identity).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orient2d_sign_indicates_side() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(1.0, 0.0);
        assert!(orient2d(a, b, 0.5, 1.0) > 0);
        assert!(orient2d(a, b, 0.5, -1.0) < 0);
    }

    #[test]
    fn lerp_weight_on_first_argument() {
        let a = 10.0_f64;
        let b = 0.0_f64;
        assert_eq!(lerp(a, b, 1.0), 10.0);
        assert_eq!(lerp(a, b, 0.0), 0.0);
        assert_eq!(lerp(a, b, 0.5), 5.0);
    }

    #[test]
    fn ponderate_weighted_sum() {
        let pts = [1.0_f64, 2.0, 3.0];
        let weights = [1.0, 0.0, 0.0];
        assert_eq!(ponderate(pts, weights), 1.0);
    }

    #[test]
    fn normal_matrix_of_identity_is_identity() {
        let id = Mat4::identity();
        let nm = normal_matrix(&id);
        assert!((nm - Mat4::identity()).abs().max() < 1e-9);
    }
}
