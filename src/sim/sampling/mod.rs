//! Direction sampling strategies.
//!
//! Each analysis samples a different set of weighted directions: sun-path
//! positions for solar exposure, hemisphere-dome patches for sky exposure,
//! compass-sector fans crossed with vertical layers for wind. All samplers
//! produce weights that sum to 1 over the full distribution.

pub mod sky;
pub mod solar;
pub mod wind;

pub use sky::{SkyWeighting, sky_samples};
pub use solar::solar_samples;
pub use wind::wind_samples;

use crate::Vector;

/// One weighted sample direction.
#[derive(Debug, Clone, Copy)]
pub struct DirectionSample {
    /// Unit direction vector.
    pub direction: Vector,
    /// Non-negative weight; the full set sums to 1.
    pub weight: f64,
    /// Vertical displacement of the ray origin (wind layers; 0 elsewhere).
    pub z_offset: f64,
    /// Bucket the sample belongs to: wind sector, dome ring or schedule day.
    pub bucket: usize,
}

/// The weighted sample set for one analysis.
#[derive(Debug, Clone)]
pub struct DirectionSamples {
    pub samples: Vec<DirectionSample>,
}

impl DirectionSamples {
    pub fn total_weight(&self) -> f64 {
        self.samples.iter().map(|s| s.weight).sum()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
