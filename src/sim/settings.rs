//! Per-analysis settings and per-site configuration.
//!
//! Every empirically fitted constant (facade calibration maxima, the UHI
//! regression) lives here so that callers can override it; the defaults are
//! the values fitted for the Singapore site.

use serde::{Deserialize, Serialize};

use crate::SensorClass;

/// Default near bound of the raycast band for every analysis.
pub const DEFAULT_NEAR: f64 = 1.0;

/// Solar exposure settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarSettings {
    /// Sun-path schedule density.
    pub detail: usize,
    /// Far raycast radius, m.
    pub radius: f64,
    /// Empirical maximum achievable raw value for facade sensors; the
    /// facing cull caps how much of the sun path a vertical surface sees.
    pub facade_max_val: f64,
    /// Sensor ray origin offset, m.
    pub offset: f64,
}

impl Default for SolarSettings {
    fn default() -> Self {
        Self {
            detail: 1,
            radius: 1000.0,
            facade_max_val: 0.6945730087671974,
            offset: 0.05,
        }
    }
}

/// Sky exposure settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkySettings {
    /// Dome subdivision density.
    pub detail: usize,
    /// Far raycast radius, m.
    pub radius: f64,
    /// Empirical maximum achievable raw value for facade sensors.
    pub facade_max_val: f64,
    /// Sensor ray origin offset, m.
    pub offset: f64,
}

impl Default for SkySettings {
    fn default() -> Self {
        Self {
            detail: 0,
            radius: 1000.0,
            facade_max_val: 0.5989617186548527,
            offset: 0.05,
        }
    }
}

/// Urban heat island settings.
///
/// The UHI delta is a linear regression over the unweighted sky view
/// factor, `uhi = slope * svf + intercept`, fitted empirically for the
/// target city (defaults: Singapore).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UhiSettings {
    /// Dome subdivision density for the sky view factor input.
    pub detail: usize,
    /// Far raycast radius, m.
    pub radius: f64,
    /// Sensor ray origin offset, m.
    pub offset: f64,
    pub slope: f64,
    pub intercept: f64,
}

impl Default for UhiSettings {
    fn default() -> Self {
        Self {
            detail: 0,
            radius: 1000.0,
            offset: 0.05,
            slope: -6.51,
            intercept: 7.13,
        }
    }
}

impl UhiSettings {
    /// Air temperature increment for one sky-exposure fraction in `[0, 1]`.
    pub fn delta_t(&self, sky_fraction: f64) -> f64 {
        self.slope * sky_fraction + self.intercept
    }
}

/// Wind permeability settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindSettings {
    /// Directions per compass sector.
    pub num_rays: usize,
    /// Far raycast radius, m.
    pub radius: f64,
    /// Vertical layer schedule `[start, end, step]`, m above the sensor.
    pub layers: [f64; 3],
    /// Sensor ray origin offset, m.
    pub offset: f64,
    /// Near raycast bound, m.
    pub near: f64,
}

impl Default for WindSettings {
    fn default() -> Self {
        Self {
            num_rays: 4,
            radius: 200.0,
            layers: [1.0, 18.0, 4.0],
            offset: 0.01,
            near: DEFAULT_NEAR,
        }
    }
}

/// Metric selector for desirable-range lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Solar,
    Sky,
    Uhi,
    Wind,
}

/// Site location plus the desirable-range band per metric and sensor class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Degrees, positive north.
    pub latitude: f64,
    /// Degrees, positive east.
    pub longitude: f64,
    pub ground_solar: [f64; 2],
    pub facade_solar: [f64; 2],
    pub ground_sky: [f64; 2],
    pub facade_sky: [f64; 2],
    pub ground_uhi: [f64; 2],
    pub ground_wind: [f64; 2],
}

impl Default for SiteConfig {
    fn default() -> Self {
        // Singapore site defaults
        Self {
            latitude: 1.298759,
            longitude: 103.778329,
            ground_solar: [0.0, 50.0],
            facade_solar: [0.0, 50.0],
            ground_sky: [50.0, 100.0],
            facade_sky: [50.0, 100.0],
            ground_uhi: [0.0, 4.0],
            ground_wind: [60.0, 100.0],
        }
    }
}

impl SiteConfig {
    /// Desirable band for one metric and sensor class. UHI and wind are
    /// ground metrics; a facade lookup falls back to the ground band.
    pub fn desirable_range(&self, metric: Metric, class: SensorClass) -> [f64; 2] {
        match (metric, class) {
            (Metric::Solar, SensorClass::Ground) => self.ground_solar,
            (Metric::Solar, SensorClass::Facade) => self.facade_solar,
            (Metric::Sky, SensorClass::Ground) => self.ground_sky,
            (Metric::Sky, SensorClass::Facade) => self.facade_sky,
            (Metric::Uhi, _) => self.ground_uhi,
            (Metric::Wind, _) => self.ground_wind,
        }
    }
}
