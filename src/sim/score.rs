//! Scoring: desirable-band classification and area-weighted aggregation.

use serde::{Deserialize, Serialize};

use crate::EngineError;
use crate::sim::evaluate::ensure_matching_counts;

/// Outcome of classifying sensor values against a desirable band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Total area of sensors inside the desirable range, m^2.
    pub desirable_area: f64,
    /// Total area of sensors outside it, m^2.
    pub undesirable_area: f64,
    /// `100 * desirable / (desirable + undesirable)`.
    pub score: f64,
}

/// Classifies each sensor's value against `[min, max]` and computes the
/// area-weighted score percentage.
///
/// Fails with `ZeroArea` when the total sensor area is zero (the score
/// fraction is undefined) and with `ResultMismatch` when `values` and
/// `areas` differ in length.
pub fn score(
    values: &[f64],
    areas: &[f64],
    desirable_range: [f64; 2],
) -> Result<ScoreResult, EngineError> {
    ensure_matching_counts("score", areas.len(), values.len())?;
    let [min, max] = desirable_range;
    let mut desirable_area = 0.0;
    let mut undesirable_area = 0.0;
    for (value, area) in values.iter().zip(areas) {
        if *value < min || *value > max {
            undesirable_area += area;
        } else {
            desirable_area += area;
        }
    }
    let total = desirable_area + undesirable_area;
    if total <= 0.0 {
        return Err(EngineError::ZeroArea);
    }
    Ok(ScoreResult {
        desirable_area,
        undesirable_area,
        score: 100.0 * desirable_area / total,
    })
}

/// Area-weighted mean of the sensor values: `sum(v*a) / sum(a)`.
///
/// Used for the site-wide mean UHI delta. Fails with `ZeroArea` when the
/// total area is zero.
pub fn mean_aggregate(values: &[f64], areas: &[f64]) -> Result<f64, EngineError> {
    ensure_matching_counts("aggregate", areas.len(), values.len())?;
    let total_area: f64 = areas.iter().sum();
    if total_area <= 0.0 {
        return Err(EngineError::ZeroArea);
    }
    let weighted: f64 = values.iter().zip(areas).map(|(v, a)| v * a).sum();
    Ok(weighted / total_area)
}
