//! Compass-sector fan sampling for the wind permeability analysis.

use std::f64::consts::PI;

use crate::{EngineError, Vector, WindRose};

use super::{DirectionSample, DirectionSamples};

/// Builds the wind sample set: per compass sector, a horizontal fan of
/// `num_rays` directions, repeated at each vertical layer.
///
/// Sector `s` of `S` sectors is centered at angle `s * 2*pi/S` from north,
/// clockwise; its fan spans the sector width `2*pi/S` with an angular
/// increment of `width/num_rays`, starting at `-width/2 + increment/2`.
/// Directions are horizontal: `(sin a, cos a, 0)`.
///
/// Layers `[start, end, step]` produce `round((end-start)/step)` heights
/// `start + k*step`; every (sector, ray, layer) sample carries weight
/// `freq[s] / (num_rays * num_layers)`, so the full set sums to the rose
/// total and the rose frequencies are conserved for an unobstructed sensor.
///
/// Bucket ids group samples by sector.
pub fn wind_samples(
    rose: &WindRose,
    num_rays: usize,
    layers: [f64; 3],
) -> Result<DirectionSamples, EngineError> {
    if num_rays == 0 {
        return Err(EngineError::configuration(
            "wind",
            "num_rays must be at least 1",
        ));
    }
    let [start, end, step] = layers;
    if step <= 0.0 || end <= start {
        return Err(EngineError::Configuration {
            analysis: "wind".to_string(),
            reason: format!("invalid layer schedule [{start}, {end}, {step}]"),
        });
    }
    let num_layers = (((end - start) / step).round() as usize).max(1);

    let num_sectors = rose.num_sectors();
    let sector_width = 2.0 * PI / num_sectors as f64;
    let increment = sector_width / num_rays as f64;
    let angle_start = -sector_width / 2.0 + increment / 2.0;

    let mut samples =
        Vec::with_capacity(num_sectors * num_rays * num_layers);
    for (sector, freq) in rose.frequencies().iter().enumerate() {
        let weight = freq / (num_rays * num_layers) as f64;
        for ray_i in 0..num_rays {
            let angle = angle_start + sector as f64 * sector_width + ray_i as f64 * increment;
            let direction = Vector::new(angle.sin(), angle.cos(), 0.0);
            for layer in 0..num_layers {
                samples.push(DirectionSample {
                    direction,
                    weight,
                    z_offset: start + layer as f64 * step,
                    bucket: sector,
                });
            }
        }
    }
    Ok(DirectionSamples { samples })
}
