//! Immutable input snapshot for a simulation run.
//!
//! Sensor and obstruction surfaces are produced by external scene loaders
//! (grid generators, footprint extruders, file importers) and are never
//! mutated by the engine.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::geom::triangles::{TriangleIndex, fan_triangulation, triangles_area};
use crate::{EngineError, Point, Vector};

/// Which kind of surface a sensor sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorClass {
    Ground,
    Facade,
}

impl SensorClass {
    pub fn label(&self) -> &'static str {
        match self {
            SensorClass::Ground => "ground",
            SensorClass::Facade => "facade",
        }
    }
}

/// One polygon being evaluated: a ground cell or a facade element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorSurface {
    pub name: String,
    /// Planar area in m^2.
    pub area: f64,
    /// Representative point (centroid).
    pub point: Point,
    /// Outward unit normal.
    pub normal: Vector,
    pub class: SensorClass,
}

impl SensorSurface {
    /// Builds a sensor surface from a convex polygon, counter-clockwise with
    /// respect to its front (outward) side.
    pub fn from_convex_polygon(name: &str, pts: &[Point], class: SensorClass) -> Result<Self> {
        if pts.len() < 3 {
            return Err(anyhow!("Sensor polygon needs at least 3 vertices"));
        }
        let normal = Vector::normal(pts[0], pts[1], pts[2])?;
        let triangles = fan_triangulation(pts.len());
        let area = triangles_area(pts, &triangles);
        let n = pts.len() as f64;
        let point = Point::new(
            pts.iter().map(|p| p.x).sum::<f64>() / n,
            pts.iter().map(|p| p.y).sum::<f64>() / n,
            pts.iter().map(|p| p.z).sum::<f64>() / n,
        );
        Ok(Self {
            name: name.to_string(),
            area,
            point,
            normal,
            class,
        })
    }
}

/// Obstruction categories; walkways are excluded from the wind analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstructionKind {
    Building,
    Walkway,
}

/// Wall/roof classification of an obstruction facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceClass {
    Wall,
    Roof,
}

/// Triangulated geometry that can block sensor rays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstructionSurface {
    pub name: String,
    pub vertices: Vec<Point>,
    pub triangles: Vec<TriangleIndex>,
    pub kind: ObstructionKind,
    /// Only surfaces flagged as obstructions enter the geometry index.
    pub obstruction: bool,
}

impl ObstructionSurface {
    /// Builds a planar obstruction from a convex polygon.
    pub fn from_convex_polygon(name: &str, pts: &[Point], kind: ObstructionKind) -> Result<Self> {
        if pts.len() < 3 {
            return Err(anyhow!("Obstruction polygon needs at least 3 vertices"));
        }
        Ok(Self {
            name: name.to_string(),
            triangles: fan_triangulation(pts.len()),
            vertices: pts.to_vec(),
            kind,
            obstruction: true,
        })
    }

    /// Extrudes a convex counter-clockwise footprint upward by `height`,
    /// producing side quads plus a top cap. This is how building volumes are
    /// generated from 2D footprints.
    pub fn extrusion(name: &str, footprint: &[Point], height: f64) -> Result<Self> {
        let n = footprint.len();
        if n < 3 {
            return Err(anyhow!("Footprint needs at least 3 vertices"));
        }
        if height <= 0.0 {
            return Err(anyhow!("Extrusion height must be positive"));
        }
        let lift = Vector::new(0.0, 0.0, height);
        let mut vertices: Vec<Point> = footprint.to_vec();
        vertices.extend(footprint.iter().map(|p| *p + lift));

        let mut triangles = Vec::with_capacity(2 * n + (n - 2));
        // Side quads: base i, base j, top j, top i
        for i in 0..n {
            let j = (i + 1) % n;
            triangles.push(TriangleIndex(i, j, n + j));
            triangles.push(TriangleIndex(i, n + j, n + i));
        }
        // Top cap fan over the raised footprint
        for i in 1..(n - 1) {
            triangles.push(TriangleIndex(n, n + i, n + i + 1));
        }
        Ok(Self {
            name: name.to_string(),
            vertices,
            triangles,
            kind: ObstructionKind::Building,
            obstruction: true,
        })
    }

    /// Unit normal of one facet.
    pub fn facet_normal(&self, facet: usize) -> Result<Vector> {
        let t = &self.triangles[facet];
        Vector::normal(self.vertices[t.0], self.vertices[t.1], self.vertices[t.2])
    }

    /// Wall/roof classification of one facet: a facet whose normal has a
    /// vertical component above 0.5 counts as roof.
    pub fn facet_class(&self, facet: usize) -> Result<SurfaceClass> {
        let vn = self.facet_normal(facet)?;
        if vn.dz.abs() > 0.5 {
            Ok(SurfaceClass::Roof)
        } else {
            Ok(SurfaceClass::Wall)
        }
    }

    /// Classification of a planar surface (taken from its first facet).
    pub fn class(&self) -> Result<SurfaceClass> {
        self.facet_class(0)
    }
}

/// A per-compass-sector wind frequency distribution for a weather station.
///
/// Sector 0 points north; sectors advance clockwise. Frequencies must be
/// non-negative and sum to ~1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindRose {
    frequencies: Vec<f64>,
}

impl WindRose {
    const SUM_TOLERANCE: f64 = 1e-3;

    pub fn new(frequencies: Vec<f64>) -> Result<Self, EngineError> {
        if frequencies.is_empty() {
            return Err(EngineError::configuration("wind", "empty wind rose"));
        }
        if frequencies.iter().any(|f| *f < 0.0) {
            return Err(EngineError::configuration(
                "wind",
                "wind rose frequencies must be non-negative",
            ));
        }
        let sum: f64 = frequencies.iter().sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(EngineError::Configuration {
                analysis: "wind".to_string(),
                reason: format!("wind rose frequencies sum to {sum}, expected ~1"),
            });
        }
        Ok(Self { frequencies })
    }

    pub fn num_sectors(&self) -> usize {
        self.frequencies.len()
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }
}

/// Immutable geometry snapshot handed to the engine by the scene loaders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub sensors: Vec<SensorSurface>,
    pub obstructions: Vec<ObstructionSurface>,
}

impl Scene {
    pub fn sensors_of_class(&self, class: SensorClass) -> Vec<&SensorSurface> {
        self.sensors.iter().filter(|s| s.class == class).collect()
    }
}
