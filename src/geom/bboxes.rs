use crate::geom::point::Point;
use crate::geom::vector::Vector;

pub fn bounding_box(pts: &[Point]) -> (Point, Point) {
    let mut pmin = Point::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
    let mut pmax = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in pts {
        pmin.x = pmin.x.min(p.x);
        pmin.y = pmin.y.min(p.y);
        pmin.z = pmin.z.min(p.z);
        pmax.x = pmax.x.max(p.x);
        pmax.y = pmax.y.max(p.y);
        pmax.z = pmax.z.max(p.z);
    }
    (pmin, pmax)
}

/// Slab test: whether the ray segment `origin + t * direction`, `t` in
/// `[t_min, t_max]`, passes through the box `[pmin, pmax]`.
///
/// `direction` must be normalized so that `t` is a distance.
pub fn ray_intersects_bbox(
    origin: Point,
    direction: Vector,
    t_min: f64,
    t_max: f64,
    pmin: Point,
    pmax: Point,
) -> bool {
    let mut t0 = t_min;
    let mut t1 = t_max;

    let axes = [
        (origin.x, direction.dx, pmin.x, pmax.x),
        (origin.y, direction.dy, pmin.y, pmax.y),
        (origin.z, direction.dz, pmin.z, pmax.z),
    ];
    for (o, d, lo, hi) in axes {
        if d.abs() < 1e-300 {
            if o < lo || o > hi {
                return false;
            }
            continue;
        }
        let inv = 1.0 / d;
        let (mut ta, mut tb) = ((lo - o) * inv, (hi - o) * inv);
        if ta > tb {
            std::mem::swap(&mut ta, &mut tb);
        }
        t0 = t0.max(ta);
        t1 = t1.min(tb);
        if t0 > t1 {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let pts = vec![
            Point::new(1., -2., 3.),
            Point::new(-1., 2., 0.),
            Point::new(0., 0., 5.),
        ];
        let (pmin, pmax) = bounding_box(&pts);
        assert!(pmin.is_close(&Point::new(-1., -2., 0.)));
        assert!(pmax.is_close(&Point::new(1., 2., 5.)));
    }

    #[test]
    fn test_ray_hits_bbox() {
        let pmin = Point::new(0., 0., 0.);
        let pmax = Point::new(1., 1., 1.);
        let origin = Point::new(0.5, 0.5, -5.0);
        let dir = Vector::new(0., 0., 1.);
        assert!(ray_intersects_bbox(origin, dir, 0.0, 100.0, pmin, pmax));
    }

    #[test]
    fn test_ray_misses_bbox() {
        let pmin = Point::new(0., 0., 0.);
        let pmax = Point::new(1., 1., 1.);
        // Pointing away
        let origin = Point::new(0.5, 0.5, -5.0);
        let dir = Vector::new(0., 0., -1.);
        assert!(!ray_intersects_bbox(origin, dir, 0.0, 100.0, pmin, pmax));
        // Out of range
        assert!(!ray_intersects_bbox(
            origin,
            Vector::new(0., 0., 1.),
            0.0,
            1.0,
            pmin,
            pmax
        ));
        // Parallel, outside the slab
        let origin = Point::new(5.0, 0.5, 0.5);
        let dir = Vector::new(0., 1., 0.);
        assert!(!ray_intersects_bbox(origin, dir, 0.0, 100.0, pmin, pmax));
    }
}
