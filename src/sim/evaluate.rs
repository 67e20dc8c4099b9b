//! Exposure evaluation: raycasting every sampled direction for every
//! sensor ray and reducing the hits into one scalar per sensor.

use rayon::prelude::*;

use crate::sim::sampling::DirectionSamples;
use crate::{EngineError, GeometryIndex, Point, SensorRay};

/// Directions pointing more than 90 degrees away from the sensor's own
/// facing direction are not sampled.
const CULL_EPS: f64 = 1e-6;

/// Evaluates one scalar raw exposure value per sensor ray.
///
/// For every sample direction surviving the facing cull, a bounded raycast
/// is issued against the index: a miss contributes the sample's full weight,
/// a hit at distance `d` contributes `weight * d / far`. Sensors are
/// independent, so the per-sensor loop runs in parallel; the index is shared
/// immutably and queries are stateless.
///
/// `radius` is the `[near, far]` raycast band. `analysis` names the run in
/// error messages.
pub fn evaluate(
    rays: &[SensorRay],
    index: &GeometryIndex,
    samples: &DirectionSamples,
    radius: [f64; 2],
    analysis: &str,
) -> Result<Vec<f64>, EngineError> {
    if rays.is_empty() {
        return Err(EngineError::configuration(analysis, "no sensors"));
    }
    if index.is_empty() {
        return Err(EngineError::configuration(analysis, "no obstructions"));
    }
    let [near, far] = radius;

    let values: Vec<f64> = rays
        .par_iter()
        .map(|ray| {
            let mut total = 0.0;
            for s in &samples.samples {
                if s.direction.dot(&ray.direction) < -CULL_EPS {
                    continue;
                }
                let origin = Point::new(ray.origin.x, ray.origin.y, ray.origin.z + s.z_offset);
                match index.query(origin, s.direction, near, far) {
                    None => total += s.weight,
                    Some(dist) => total += s.weight * (dist / far),
                }
            }
            total
        })
        .collect();

    ensure_matching_counts(analysis, rays.len(), values.len())?;
    Ok(values)
}

/// Verifies that the number of results matches the number of sensors.
pub fn ensure_matching_counts(
    analysis: &str,
    num_sensors: usize,
    num_values: usize,
) -> Result<(), EngineError> {
    if num_sensors != num_values {
        return Err(EngineError::ResultMismatch {
            analysis: analysis.to_string(),
            num_sensors,
            num_values,
        });
    }
    Ok(())
}

/// Normalizes a raw exposure value into a percentage: clamp to
/// `[0, max_val]`, divide by `max_val`, express as 0-100.
pub fn normalize_percent(raw: f64, max_val: f64) -> f64 {
    (raw / max_val).clamp(0.0, 1.0) * 100.0
}
