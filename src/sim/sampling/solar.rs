//! Sun-path sampling for the solar exposure analysis.

use crate::Vector;

use super::{DirectionSample, DirectionSamples};

/// Solar position (azimuth and elevation angles).
#[derive(Debug, Clone, Copy)]
pub struct SolarPosition {
    /// Solar altitude angle in degrees (0 = horizon, 90 = zenith).
    pub altitude: f64,
    /// Solar azimuth angle in degrees from north, clockwise (0=N, 90=E, 180=S, 270=W).
    pub azimuth: f64,
}

impl SolarPosition {
    /// Calculates the solar position using the Spencer algorithm.
    ///
    /// - `latitude`: in degrees (positive north)
    /// - `longitude`: in degrees (positive east)
    /// - `day_of_year`: 1-365
    /// - `hour`: solar time in hours (0-24)
    pub fn calculate(latitude: f64, longitude: f64, day_of_year: u16, hour: f64) -> Self {
        let lat = latitude.to_radians();
        let _lon = longitude; // Longitude only affects solar time correction

        // Day angle (Spencer)
        let gamma = 2.0 * std::f64::consts::PI * (day_of_year as f64 - 1.0) / 365.0;

        // Solar declination (Spencer approximation)
        let declination = 0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
            - 0.006758 * (2.0 * gamma).cos()
            + 0.000907 * (2.0 * gamma).sin()
            - 0.002697 * (3.0 * gamma).cos()
            + 0.00148 * (3.0 * gamma).sin();

        // Hour angle (15 degrees per hour from solar noon)
        let hour_angle = (hour - 12.0) * 15.0_f64.to_radians();

        // Solar altitude
        let sin_alt =
            lat.sin() * declination.sin() + lat.cos() * declination.cos() * hour_angle.cos();
        let altitude = sin_alt.asin().to_degrees();

        // Solar azimuth
        let cos_azimuth = (declination.sin() * lat.cos()
            - declination.cos() * lat.sin() * hour_angle.cos())
            / altitude.to_radians().cos().max(1e-10);

        let mut azimuth = cos_azimuth.clamp(-1.0, 1.0).acos().to_degrees();
        if hour_angle > 0.0 {
            azimuth = 360.0 - azimuth;
        }

        Self { altitude, azimuth }
    }

    /// Returns true if the sun is above the horizon.
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }

    /// Converts solar position to a direction vector (pointing toward the sun).
    pub fn to_direction(&self) -> Vector {
        let alt = self.altitude.to_radians();
        let azi = self.azimuth.to_radians();

        // Convention: azimuth from north clockwise
        // North = +Y, East = +X
        let x = alt.cos() * azi.sin();
        let y = alt.cos() * azi.cos();
        let z = alt.sin();

        Vector::new(x, y, z)
    }
}

/// Hours of the sampled solar day.
const DAY_START_HOUR: f64 = 7.0;
const DAY_END_HOUR: f64 = 19.0;

/// Samples sun positions over a day-of-year x solar-hour schedule.
///
/// `detail` controls the angular resolution of the schedule: `4*(detail+1)`
/// days spread uniformly over the year, `detail+1` samples per hour between
/// 07:00 and 19:00. Below-horizon positions are dropped. Each position is
/// weighted by its direct-normal contribution, approximated as
/// `sin(altitude)`, and weights are normalized to sum to 1.
///
/// Bucket ids group samples by schedule day.
pub fn solar_samples(latitude: f64, longitude: f64, detail: usize) -> DirectionSamples {
    let num_days = 4 * (detail + 1);
    let steps_per_hour = detail + 1;
    let hour_step = 1.0 / steps_per_hour as f64;
    let num_hours = ((DAY_END_HOUR - DAY_START_HOUR) * steps_per_hour as f64).round() as usize;

    let mut samples = Vec::new();
    for day_i in 0..num_days {
        let day_of_year = ((day_i as f64 + 0.5) * 365.0 / num_days as f64).round() as u16;
        for hour_i in 0..num_hours {
            let hour = DAY_START_HOUR + hour_i as f64 * hour_step;
            let pos = SolarPosition::calculate(latitude, longitude, day_of_year, hour);
            if !pos.is_above_horizon() {
                continue;
            }
            let weight = pos.altitude.to_radians().sin();
            if weight <= 0.0 {
                continue;
            }
            samples.push(DirectionSample {
                direction: pos.to_direction(),
                weight,
                z_offset: 0.0,
                bucket: day_i,
            });
        }
    }

    let total: f64 = samples.iter().map(|s| s.weight).sum();
    if total > 0.0 {
        for s in &mut samples {
            s.weight /= total;
        }
    }
    DirectionSamples { samples }
}
