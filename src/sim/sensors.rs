//! Sensor ray derivation.

use serde::{Deserialize, Serialize};

use crate::{EngineError, Point, SensorSurface, Vector};

/// A point + direction sample representing one sensor surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SensorRay {
    /// Origin, offset slightly off the surface to avoid self-intersection.
    pub origin: Point,
    /// Outward unit direction.
    pub direction: Vector,
}

/// Derives one ray per sensor surface: origin = representative point +
/// normal * `offset`, direction = outward normal.
///
/// The offset keeps ray origins clear of their own surface; the wind
/// analysis uses 0.01 m, the exposure analyses a larger 0.05 m.
pub fn build_sensor_rays(
    sensors: &[SensorSurface],
    offset: f64,
) -> Result<Vec<SensorRay>, EngineError> {
    if sensors.is_empty() {
        return Err(EngineError::configuration("sensor rays", "no sensors"));
    }
    Ok(sensors
        .iter()
        .map(|s| SensorRay {
            origin: s.point + s.normal * offset,
            direction: s.normal,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SensorClass;
    use anyhow::Result;

    #[test]
    fn test_ray_offset_along_normal() -> Result<()> {
        let pts = vec![
            Point::new(0., 0., 2.),
            Point::new(1., 0., 2.),
            Point::new(1., 1., 2.),
            Point::new(0., 1., 2.),
        ];
        let sensor = SensorSurface::from_convex_polygon("g0", &pts, SensorClass::Ground)?;
        let rays = build_sensor_rays(std::slice::from_ref(&sensor), 0.01)?;
        assert_eq!(rays.len(), 1);
        assert!(rays[0].origin.is_close(&Point::new(0.5, 0.5, 2.01)));
        assert!(rays[0].direction.is_close(&Vector::new(0., 0., 1.)));
        Ok(())
    }

    #[test]
    fn test_empty_sensors_fail() {
        let err = build_sensor_rays(&[], 0.01).unwrap_err();
        assert!(matches!(err, EngineError::Configuration { .. }));
    }
}
