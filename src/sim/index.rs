//! Obstruction geometry indexing.
//!
//! Merges the triangles of all obstruction surfaces into one flat,
//! read-only structure answering bounded nearest-hit raycast queries.

use crate::ObstructionSurface;
use crate::geom::bboxes::{bounding_box, ray_intersects_bbox};
use crate::geom::ray::intersect_triangle;
use crate::{Point, Vector};

/// One intersectable structure over an immutable obstruction snapshot.
///
/// Built once per simulation run and shared read-only across evaluation
/// workers; queries take `&self` and carry no mutable state. All buffers are
/// released when the index is dropped.
#[derive(Debug, Clone)]
pub struct GeometryIndex {
    /// Merged triangle soup: vertex triples of every obstruction facet.
    triangles: Vec<[Point; 3]>,
    bbox_min: Point,
    bbox_max: Point,
}

impl GeometryIndex {
    /// Merges the triangles of every surface flagged `obstruction` into one
    /// intersectable structure.
    pub fn build(obstructions: &[ObstructionSurface]) -> Self {
        let mut triangles = Vec::new();
        for surface in obstructions.iter().filter(|s| s.obstruction) {
            for t in &surface.triangles {
                triangles.push([
                    surface.vertices[t.0],
                    surface.vertices[t.1],
                    surface.vertices[t.2],
                ]);
            }
        }
        let all_pts: Vec<Point> = triangles.iter().flatten().copied().collect();
        let (bbox_min, bbox_max) = bounding_box(&all_pts);
        Self {
            triangles,
            bbox_min,
            bbox_max,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Nearest-hit distance along `direction` within `[near, far]`, or
    /// `None` when nothing is hit in that range.
    ///
    /// `direction` must be a unit vector so that distances are metric.
    pub fn query(&self, origin: Point, direction: Vector, near: f64, far: f64) -> Option<f64> {
        if self.triangles.is_empty() {
            return None;
        }
        if !ray_intersects_bbox(origin, direction, near, far, self.bbox_min, self.bbox_max) {
            return None;
        }
        let mut closest: Option<f64> = None;
        for [a, b, c] in &self.triangles {
            if let Some(t) = intersect_triangle(origin, direction, *a, *b, *c, near, far) {
                match closest {
                    None => closest = Some(t),
                    Some(best) if t < best => closest = Some(t),
                    _ => {}
                }
            }
        }
        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObstructionKind;
    use anyhow::Result;

    fn overhead_plane(z: f64) -> Result<ObstructionSurface> {
        let pts = vec![
            Point::new(-50.0, -50.0, z),
            Point::new(50.0, -50.0, z),
            Point::new(50.0, 50.0, z),
            Point::new(-50.0, 50.0, z),
        ];
        Ok(ObstructionSurface::from_convex_polygon(
            "plane",
            &pts,
            ObstructionKind::Building,
        )?)
    }

    #[test]
    fn test_empty_index() {
        let index = GeometryIndex::build(&[]);
        assert!(index.is_empty());
        assert!(
            index
                .query(Point::new(0., 0., 0.), Vector::new(0., 0., 1.), 1.0, 1000.0)
                .is_none()
        );
    }

    #[test]
    fn test_unflagged_surfaces_excluded() -> Result<()> {
        let mut plane = overhead_plane(10.0)?;
        plane.obstruction = false;
        let index = GeometryIndex::build(&[plane]);
        assert!(index.is_empty());
        Ok(())
    }

    #[test]
    fn test_nearest_hit() -> Result<()> {
        let index = GeometryIndex::build(&[overhead_plane(10.0)?, overhead_plane(30.0)?]);
        assert_eq!(index.num_triangles(), 4);
        let d = index.query(Point::new(0., 0., 0.), Vector::new(0., 0., 1.), 1.0, 1000.0);
        assert!(d.is_some());
        assert!((d.unwrap() - 10.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_near_far_bounds() -> Result<()> {
        let index = GeometryIndex::build(&[overhead_plane(10.0)?]);
        let origin = Point::new(0., 0., 0.);
        let up = Vector::new(0., 0., 1.);
        // Closer than near
        assert!(index.query(origin, up, 20.0, 1000.0).is_none());
        // Farther than far
        assert!(index.query(origin, up, 1.0, 5.0).is_none());
        // Inside the band
        assert!(index.query(origin, up, 1.0, 15.0).is_some());
        Ok(())
    }

    #[test]
    fn test_miss_sideways() -> Result<()> {
        let index = GeometryIndex::build(&[overhead_plane(10.0)?]);
        let d = index.query(Point::new(0., 0., 0.), Vector::new(1., 0., 0.), 1.0, 1000.0);
        assert!(d.is_none());
        Ok(())
    }
}
