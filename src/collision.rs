//! Axis-aligned-bounding-box collision test and the slide-along-surface
//! movement resolver.

use crate::algebra::Vec3;
use crate::mesh::Mesh;

/// Something a moving observer can collide with.
pub trait Collisionable {
    /// Tests whether the segment `from -> to` (taken along `direction`,
    /// where `to = from + direction`) crosses this obstacle. Returns
    /// `(hit, normal, t)` for the nearest face the segment crosses, with
    /// `t` the fraction of `direction` traveled before impact. A hit
    /// requires the crossing to happen within the segment (`t` in
    /// `[0, 1]`), not that `to` itself ends up inside the obstacle — a
    /// fast-enough movement can tunnel past the far side of the box
    /// within a single frame and must still be caught.
    fn test(&self, from: Vec3, to: Vec3, direction: Vec3) -> (bool, Vec3, f64);
}

/// An axis-aligned bounding box, enlarged slightly past its source mesh's
/// extents. Lifetime is independent of the mesh it was built from — it
/// holds no reference back to it.
pub struct Aabb {
    pub pmin: Vec3,
    pub pmax: Vec3,
}

const ENLARGE: f64 = 0.01;
const PARALLEL_EPSILON: f64 = 1e-12;

impl Aabb {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut pmin = Vec3::new(f64::MAX, f64::MAX, f64::MAX);
        let mut pmax = Vec3::new(f64::MIN, f64::MIN, f64::MIN);
        for t in &mesh.triangles {
            for v in &t.world_position {
                pmin.x = pmin.x.min(v.x);
                pmin.y = pmin.y.min(v.y);
                pmin.z = pmin.z.min(v.z);
                pmax.x = pmax.x.max(v.x);
                pmax.y = pmax.y.max(v.y);
                pmax.z = pmax.z.max(v.z);
            }
        }
        let enlarge = Vec3::new(ENLARGE, ENLARGE, ENLARGE);
        Aabb {
            pmin: pmin - enlarge,
            pmax: pmax + enlarge,
        }
    }
}

/// Per-axis bounds of the slab the ray is tested against.
struct Axis {
    from: f64,
    dir: f64,
    pmin: f64,
    pmax: f64,
    normal: Vec3,
}

impl Collisionable for Aabb {
    fn test(&self, from: Vec3, _to: Vec3, direction: Vec3) -> (bool, Vec3, f64) {
        let axes = [
            Axis {
                from: from.x,
                dir: direction.x,
                pmin: self.pmin.x,
                pmax: self.pmax.x,
                normal: Vec3::new(1.0, 0.0, 0.0),
            },
            Axis {
                from: from.y,
                dir: direction.y,
                pmin: self.pmin.y,
                pmax: self.pmax.y,
                normal: Vec3::new(0.0, 1.0, 0.0),
            },
            Axis {
                from: from.z,
                dir: direction.z,
                pmin: self.pmin.z,
                pmax: self.pmax.z,
                normal: Vec3::new(0.0, 0.0, 1.0),
            },
        ];

        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;
        let mut hit_normal = Vec3::zeros();

        for axis in &axes {
            if axis.dir.abs() < PARALLEL_EPSILON {
                if axis.from < axis.pmin || axis.from > axis.pmax {
                    return (false, Vec3::zeros(), 0.0);
                }
                continue;
            }

            let mut t1 = (axis.pmin - axis.from) / axis.dir;
            let mut t2 = (axis.pmax - axis.from) / axis.dir;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            if t1 > t_min {
                t_min = t1;
                hit_normal = axis.normal;
            }
            t_max = t_max.min(t2);

            if t_min > t_max {
                return (false, Vec3::zeros(), 0.0);
            }
        }

        if t_min < 0.0 || t_min > 1.0 {
            return (false, Vec3::zeros(), 0.0);
        }

        (true, hit_normal, t_min)
    }
}

/// Resolves a desired movement `m` against a set of obstacles by repeatedly
/// zeroing the movement component along the normal of the nearest blocking
/// face, until no obstacle blocks the remaining movement. Terminates in at
/// most three iterations since each iteration strictly zeros a previously
/// nonzero axis of `m`.
pub fn resolve_slide(position: Vec3, mut movement: Vec3, obstacles: &[Aabb]) -> Vec3 {
    loop {
        let target = position + movement;
        let mut collided = false;
        let mut best_t = f64::MAX;
        let mut best_normal = Vec3::zeros();

        for obstacle in obstacles {
            let (hit, normal, t) = obstacle.test(position, target, movement);
            if hit && t < best_t {
                best_t = t;
                best_normal = normal;
                collided = true;
            }
        }

        if !collided {
            return movement;
        }

        movement.x -= best_normal.x.abs() * movement.x;
        movement.y -= best_normal.y.abs() * movement.y;
        movement.z -= best_normal.z.abs() * movement.z;
    }
}
