//! Hemisphere-dome sampling for the sky exposure and UHI analyses.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::Vector;

use super::{DirectionSample, DirectionSamples};

/// Weighting mode for the sky dome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyWeighting {
    /// Patch weights follow cosine-weighted solid angle (biased toward the
    /// zenith). Used for the sky exposure metric.
    Weighted,
    /// All patches carry the same weight. Used as the sky view factor input
    /// of the UHI analysis.
    Unweighted,
}

/// Subdivides the sky hemisphere into rings of near-equal solid-angle
/// patches and returns one sample direction per patch center.
///
/// `detail` controls the subdivision: `6*(detail+1)` altitude rings, with
/// per-ring azimuth counts shrinking toward the zenith. Weights are
/// normalized to sum to 1. Bucket ids group samples by ring.
pub fn sky_samples(detail: usize, weighting: SkyWeighting) -> DirectionSamples {
    let num_rings = 6 * (detail + 1);
    let ring_height = FRAC_PI_2 / num_rings as f64;

    let mut samples = Vec::new();
    for ring in 0..num_rings {
        let alt_low = ring as f64 * ring_height;
        let alt_high = alt_low + ring_height;
        let alt = alt_low + ring_height / 2.0;
        // Patch count proportional to the ring circumference, so patches
        // keep a near-square aspect over the dome
        let num_patches = ((4 * num_rings) as f64 * alt.cos()).round().max(1.0) as usize;
        // Solid angle of one patch in this ring
        let patch_solid_angle = (alt_high.sin() - alt_low.sin()) * 2.0 * PI / num_patches as f64;

        for patch in 0..num_patches {
            let azi = (patch as f64 + 0.5) * 2.0 * PI / num_patches as f64;
            let direction = Vector::new(
                alt.cos() * azi.sin(),
                alt.cos() * azi.cos(),
                alt.sin(),
            );
            let weight = match weighting {
                SkyWeighting::Weighted => patch_solid_angle * alt.sin(),
                SkyWeighting::Unweighted => 1.0,
            };
            samples.push(DirectionSample {
                direction,
                weight,
                z_offset: 0.0,
                bucket: ring,
            });
        }
    }

    let total: f64 = samples.iter().map(|s| s.weight).sum();
    for s in &mut samples {
        s.weight /= total;
    }
    DirectionSamples { samples }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        for weighting in [SkyWeighting::Weighted, SkyWeighting::Unweighted] {
            let samples = sky_samples(0, weighting);
            assert!((samples.total_weight() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unweighted_is_uniform() {
        let samples = sky_samples(0, SkyWeighting::Unweighted);
        let expected = 1.0 / samples.len() as f64;
        for s in &samples.samples {
            assert!((s.weight - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_weighted_biases_zenith() {
        let samples = sky_samples(0, SkyWeighting::Weighted);
        let top_bucket = samples.samples.iter().map(|s| s.bucket).max().unwrap();
        let zenith_w = samples
            .samples
            .iter()
            .find(|s| s.bucket == top_bucket)
            .unwrap()
            .weight;
        let horizon_w = samples
            .samples
            .iter()
            .find(|s| s.bucket == 0)
            .unwrap()
            .weight;
        assert!(zenith_w > horizon_w);
    }

    #[test]
    fn test_all_above_horizon_unit_length() {
        let samples = sky_samples(1, SkyWeighting::Weighted);
        for s in &samples.samples {
            assert!(s.direction.dz > 0.0);
            assert!((s.direction.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_detail_increases_resolution() {
        assert!(sky_samples(1, SkyWeighting::Unweighted).len()
            > sky_samples(0, SkyWeighting::Unweighted).len());
    }
}
