use crate::Point;

/// Type for holding vertex indices for a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TriangleIndex(pub usize, pub usize, pub usize);

/// Fan triangulation of a convex polygon with `num_vertices` vertices.
///
/// Input geometry arrives pre-triangulated from the scene loaders; this
/// helper exists for convex test fixtures and the extrusion constructor.
pub fn fan_triangulation(num_vertices: usize) -> Vec<TriangleIndex> {
    (1..num_vertices.saturating_sub(1))
        .map(|i| TriangleIndex(0, i, i + 1))
        .collect()
}

/// Area of one triangle.
pub fn triangle_area(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(&(c - a)).length() / 2.0
}

/// Total area of an indexed triangle set.
pub fn triangles_area(pts: &[Point], triangles: &[TriangleIndex]) -> f64 {
    triangles
        .iter()
        .map(|t| triangle_area(pts[t.0], pts[t.1], pts[t.2]))
        .sum()
}
