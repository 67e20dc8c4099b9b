//! Ray casting primitives.
//!
//! Provides a `Ray` struct and a bounded ray-triangle intersection test used
//! by the obstruction index.

use crate::{Point, Vector};

/// A ray defined by an origin point and a direction vector.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray
    pub origin: Point,
    /// Direction vector (normalized on construction)
    pub direction: Vector,
}

impl Ray {
    /// Creates a new ray from origin point and direction vector.
    ///
    /// The direction vector is automatically normalized. Fails for a
    /// zero-length direction.
    pub fn new(origin: Point, direction: Vector) -> Option<Self> {
        let normalized = direction.normalize().ok()?;
        Some(Self {
            origin,
            direction: normalized,
        })
    }

    /// Returns the point along the ray at parameter t.
    pub fn point_at(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }
}

/// Ray-triangle intersection (Moller-Trumbore).
///
/// Returns the hit distance `t` along the normalized `direction` when the
/// ray hits the triangle `(a, b, c)` with `t` in `[t_min, t_max]`.
/// Both triangle sides are hit targets (no backface culling); obstructions
/// block rays from either side.
pub fn intersect_triangle(
    origin: Point,
    direction: Vector,
    a: Point,
    b: Point,
    c: Point,
    t_min: f64,
    t_max: f64,
) -> Option<f64> {
    const PARALLEL_EPS: f64 = 1e-10;

    let e1 = b - a;
    let e2 = c - a;
    let pvec = direction.cross(&e2);
    let det = e1.dot(&pvec);
    if det.abs() < PARALLEL_EPS {
        return None; // Ray parallel to triangle plane
    }
    let inv_det = 1.0 / det;
    let tvec = origin - a;
    let u = tvec.dot(&pvec) * inv_det;
    if !(-PARALLEL_EPS..=1.0 + PARALLEL_EPS).contains(&u) {
        return None;
    }
    let qvec = tvec.cross(&e1);
    let v = direction.dot(&qvec) * inv_det;
    if v < -PARALLEL_EPS || u + v > 1.0 + PARALLEL_EPS {
        return None;
    }
    let t = e2.dot(&qvec) * inv_det;
    if t < t_min || t > t_max {
        return None;
    }
    Some(t)
}
