//! Analysis orchestration.
//!
//! One entry point per analysis, each wiring the same pipeline: filter
//! sensors by class, build rays and the obstruction index, sample
//! directions, evaluate, post-process, score, and assemble a uniform
//! result record.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::sim::evaluate::{ensure_matching_counts, evaluate, normalize_percent};
use crate::sim::sampling::{SkyWeighting, sky_samples, solar_samples, wind_samples};
use crate::sim::score::{mean_aggregate, score};
use crate::sim::sensors::build_sensor_rays;
use crate::sim::settings::{
    DEFAULT_NEAR, Metric, SiteConfig, SkySettings, SolarSettings, UhiSettings, WindSettings,
};
use crate::{
    EngineError, GeometryIndex, ObstructionKind, Scene, SensorClass, SensorSurface, WindRose,
};

/// Uniform record returned by every analysis run.
///
/// `values` are in the same order as the input sensors of the evaluated
/// class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// e.g. "Solar Exposure (ground)".
    pub name: String,
    pub class: SensorClass,
    pub values: Vec<f64>,
    /// "%" for the exposure metrics, "°C" for UHI.
    pub unit: String,
    pub desirable_range: [f64; 2],
    /// Total sensor area inside the desirable range, m^2.
    pub desirable_area: f64,
    /// Area-weighted score percentage, 0-100.
    pub score: f64,
    /// Human-readable settings summary.
    pub settings: String,
    /// Analysis-specific site aggregate (e.g. mean UHI delta).
    pub aggregate: Option<f64>,
}

/// Solar exposure: fraction of the weighted sun path visible from each
/// sensor, as a percentage.
pub fn eval_solar(
    scene: &Scene,
    class: SensorClass,
    site: &SiteConfig,
    settings: &SolarSettings,
) -> Result<AnalysisResult, EngineError> {
    let name = format!("Solar Exposure ({})", class.label());
    let sensors = class_sensors(scene, class);
    let index = GeometryIndex::build(&scene.obstructions);
    check_before(&name, sensors.len(), index.num_triangles())?;
    info!(
        analysis = %name,
        sensors = sensors.len(),
        triangles = index.num_triangles(),
        "starting evaluation"
    );

    let rays = build_sensor_rays(&sensors, settings.offset)?;
    let samples = solar_samples(site.latitude, site.longitude, settings.detail);
    debug!(samples = samples.len(), "sun path sampled");
    let raw = evaluate(&rays, &index, &samples, [DEFAULT_NEAR, settings.radius], &name)?;

    let max_val = facade_max(class, settings.facade_max_val);
    let values: Vec<f64> = raw.iter().map(|v| normalize_percent(*v, max_val)).collect();
    ensure_matching_counts(&name, rays.len(), values.len())?;

    let desirable_range = site.desirable_range(Metric::Solar, class);
    let scored = score(&values, &areas(&sensors), desirable_range)?;
    info!(analysis = %name, score = scored.score, "evaluation finished");
    Ok(AnalysisResult {
        name,
        class,
        values,
        unit: "%".to_string(),
        desirable_range,
        desirable_area: scored.desirable_area,
        score: scored.score,
        settings: describe(settings.radius),
        aggregate: None,
    })
}

/// Sky exposure: cosine-weighted fraction of the sky dome visible from
/// each sensor, as a percentage. The aggregate is the site-level UHI
/// increment implied by the mean sky exposure, rounded to one decimal.
pub fn eval_sky(
    scene: &Scene,
    class: SensorClass,
    site: &SiteConfig,
    settings: &SkySettings,
) -> Result<AnalysisResult, EngineError> {
    let name = format!("Sky Exposure ({})", class.label());
    let sensors = class_sensors(scene, class);
    let index = GeometryIndex::build(&scene.obstructions);
    check_before(&name, sensors.len(), index.num_triangles())?;
    info!(
        analysis = %name,
        sensors = sensors.len(),
        triangles = index.num_triangles(),
        "starting evaluation"
    );

    let rays = build_sensor_rays(&sensors, settings.offset)?;
    let samples = sky_samples(settings.detail, SkyWeighting::Weighted);
    debug!(samples = samples.len(), "sky dome sampled");
    let raw = evaluate(&rays, &index, &samples, [DEFAULT_NEAR, settings.radius], &name)?;

    let max_val = facade_max(class, settings.facade_max_val);
    let values: Vec<f64> = raw.iter().map(|v| normalize_percent(*v, max_val)).collect();
    ensure_matching_counts(&name, rays.len(), values.len())?;

    let desirable_range = site.desirable_range(Metric::Sky, class);
    let scored = score(&values, &areas(&sensors), desirable_range)?;

    // Site-level air temperature increment implied by the mean sky exposure
    let mean_fraction = values.iter().sum::<f64>() / (values.len() as f64 * 100.0);
    let uhii = (UhiSettings::default().delta_t(mean_fraction) * 10.0).round() / 10.0;
    info!(analysis = %name, score = scored.score, uhii, "evaluation finished");
    Ok(AnalysisResult {
        name,
        class,
        values,
        unit: "%".to_string(),
        desirable_range,
        desirable_area: scored.desirable_area,
        score: scored.score,
        settings: describe(settings.radius),
        aggregate: Some(uhii),
    })
}

/// Urban heat island: per-sensor air temperature increment regressed from
/// the unweighted sky view factor. The aggregate is the area-weighted mean
/// delta across the site.
pub fn eval_uhi(
    scene: &Scene,
    class: SensorClass,
    site: &SiteConfig,
    settings: &UhiSettings,
) -> Result<AnalysisResult, EngineError> {
    let name = format!("Urban Heat Island ({})", class.label());
    let sensors = class_sensors(scene, class);
    let index = GeometryIndex::build(&scene.obstructions);
    check_before(&name, sensors.len(), index.num_triangles())?;
    info!(
        analysis = %name,
        sensors = sensors.len(),
        triangles = index.num_triangles(),
        "starting evaluation"
    );

    let rays = build_sensor_rays(&sensors, settings.offset)?;
    let samples = sky_samples(settings.detail, SkyWeighting::Unweighted);
    let raw = evaluate(&rays, &index, &samples, [DEFAULT_NEAR, settings.radius], &name)?;

    let values: Vec<f64> = raw.iter().map(|v| settings.delta_t(*v)).collect();
    ensure_matching_counts(&name, rays.len(), values.len())?;

    let desirable_range = site.desirable_range(Metric::Uhi, class);
    let sensor_areas = areas(&sensors);
    let scored = score(&values, &sensor_areas, desirable_range)?;
    let mean_uhi = mean_aggregate(&values, &sensor_areas)?;
    info!(analysis = %name, score = scored.score, mean_uhi, "evaluation finished");
    Ok(AnalysisResult {
        name,
        class,
        values,
        unit: "°C".to_string(),
        desirable_range,
        desirable_area: scored.desirable_area,
        score: scored.score,
        settings: describe(settings.radius),
        aggregate: Some(mean_uhi),
    })
}

/// Wind permeability: wind-rose-weighted openness of each ground sensor to
/// the prevailing winds, as a percentage. Walkway obstructions do not block
/// wind and are excluded from the index.
pub fn eval_wind(
    scene: &Scene,
    rose: &WindRose,
    site: &SiteConfig,
    settings: &WindSettings,
) -> Result<AnalysisResult, EngineError> {
    let class = SensorClass::Ground;
    let name = format!("Wind Permeability ({})", class.label());
    let sensors = class_sensors(scene, class);
    let no_walkways: Vec<_> = scene
        .obstructions
        .iter()
        .filter(|o| o.kind != ObstructionKind::Walkway)
        .cloned()
        .collect();
    let index = GeometryIndex::build(&no_walkways);
    check_before(&name, sensors.len(), index.num_triangles())?;
    info!(
        analysis = %name,
        sensors = sensors.len(),
        triangles = index.num_triangles(),
        sectors = rose.num_sectors(),
        "starting evaluation"
    );

    let rays = build_sensor_rays(&sensors, settings.offset)?;
    let samples = wind_samples(rose, settings.num_rays, settings.layers)?;
    debug!(samples = samples.len(), "wind fans sampled");
    let raw = evaluate(&rays, &index, &samples, [settings.near, settings.radius], &name)?;

    let values: Vec<f64> = raw.iter().map(|v| normalize_percent(*v, 1.0)).collect();
    ensure_matching_counts(&name, rays.len(), values.len())?;

    let desirable_range = site.desirable_range(Metric::Wind, class);
    let scored = score(&values, &areas(&sensors), desirable_range)?;
    info!(analysis = %name, score = scored.score, "evaluation finished");
    Ok(AnalysisResult {
        name,
        class,
        values,
        unit: "%".to_string(),
        desirable_range,
        desirable_area: scored.desirable_area,
        score: scored.score,
        settings: describe(settings.radius),
        aggregate: None,
    })
}

fn class_sensors(scene: &Scene, class: SensorClass) -> Vec<SensorSurface> {
    scene.sensors_of_class(class).into_iter().cloned().collect()
}

fn areas(sensors: &[SensorSurface]) -> Vec<f64> {
    sensors.iter().map(|s| s.area).collect()
}

fn facade_max(class: SensorClass, facade_max_val: f64) -> f64 {
    match class {
        SensorClass::Facade => facade_max_val,
        SensorClass::Ground => 1.0,
    }
}

fn describe(radius: f64) -> String {
    format!("Max distance: {radius} m")
}

fn check_before(
    analysis: &str,
    num_sensors: usize,
    num_triangles: usize,
) -> Result<(), EngineError> {
    if num_sensors == 0 {
        return Err(EngineError::configuration(analysis, "no sensors"));
    }
    if num_triangles == 0 {
        return Err(EngineError::configuration(analysis, "no obstructions"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ObstructionSurface, Point, SensorSurface};
    use anyhow::Result;

    fn ground_cell(name: &str, x: f64, y: f64) -> SensorSurface {
        let pts = vec![
            Point::new(x, y, 1.0),
            Point::new(x + 10.0, y, 1.0),
            Point::new(x + 10.0, y + 10.0, 1.0),
            Point::new(x, y + 10.0, 1.0),
        ];
        SensorSurface::from_convex_polygon(name, &pts, SensorClass::Ground).unwrap()
    }

    fn facade_cell(name: &str) -> SensorSurface {
        // Vertical quad facing +x
        let pts = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(0.0, 5.0, 0.0),
            Point::new(0.0, 5.0, 5.0),
            Point::new(0.0, 0.0, 5.0),
        ];
        SensorSurface::from_convex_polygon(name, &pts, SensorClass::Facade).unwrap()
    }

    /// Obstruction beyond every default radius: keeps the index non-empty
    /// without shading anything.
    fn distant_wall() -> ObstructionSurface {
        let pts = vec![
            Point::new(2000.0, -10.0, 0.0),
            Point::new(2000.0, 10.0, 0.0),
            Point::new(2000.0, 10.0, 30.0),
            Point::new(2000.0, -10.0, 30.0),
        ];
        ObstructionSurface::from_convex_polygon("far-wall", &pts, ObstructionKind::Building)
            .unwrap()
    }

    fn open_scene() -> Scene {
        Scene {
            sensors: vec![ground_cell("g0", 0.0, 0.0), ground_cell("g1", 10.0, 0.0)],
            obstructions: vec![distant_wall()],
        }
    }

    #[test]
    fn test_solar_open_scene_is_full_exposure() -> Result<()> {
        let result = eval_solar(
            &open_scene(),
            SensorClass::Ground,
            &SiteConfig::default(),
            &SolarSettings::default(),
        )?;
        assert_eq!(result.values.len(), 2);
        for v in &result.values {
            assert!((v - 100.0).abs() < 1e-6);
        }
        // 100% exposure is outside the desirable 0-50 band
        assert!((result.score - 0.0).abs() < 1e-9);
        assert_eq!(result.unit, "%");
        assert_eq!(result.settings, "Max distance: 1000 m");
        Ok(())
    }

    #[test]
    fn test_sky_open_scene() -> Result<()> {
        let result = eval_sky(
            &open_scene(),
            SensorClass::Ground,
            &SiteConfig::default(),
            &SkySettings::default(),
        )?;
        for v in &result.values {
            assert!((v - 100.0).abs() < 1e-6);
        }
        // 100% sky is inside the desirable 50-100 band
        assert!((result.score - 100.0).abs() < 1e-9);
        // Full sky exposure implies the minimum UHI increment, 0.6
        assert_eq!(result.aggregate, Some(0.6));
        Ok(())
    }

    #[test]
    fn test_uhi_open_scene_endpoint() -> Result<()> {
        let result = eval_uhi(
            &open_scene(),
            SensorClass::Ground,
            &SiteConfig::default(),
            &UhiSettings::default(),
        )?;
        for v in &result.values {
            assert!((v - 0.62).abs() < 1e-6);
        }
        assert!((result.score - 100.0).abs() < 1e-9);
        let mean = result.aggregate.unwrap();
        assert!((mean - 0.62).abs() < 1e-6);
        assert_eq!(result.unit, "°C");
        Ok(())
    }

    #[test]
    fn test_wind_open_scene_conserves_rose() -> Result<()> {
        let rose = WindRose::new(vec![1.0 / 16.0; 16]).unwrap();
        let result = eval_wind(
            &open_scene(),
            &rose,
            &SiteConfig::default(),
            &WindSettings::default(),
        )?;
        // Upward ground sensors cull nothing (horizontal fans are orthogonal)
        for v in &result.values {
            assert!((v - 100.0).abs() < 1e-6);
        }
        assert!((result.score - 100.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_wind_ignores_walkways() -> Result<()> {
        // A walkway deck right above the sensors blocks nothing for wind
        let deck_pts = vec![
            Point::new(-50.0, -50.0, 5.0),
            Point::new(50.0, -50.0, 5.0),
            Point::new(50.0, 50.0, 5.0),
            Point::new(-50.0, 50.0, 5.0),
        ];
        let mut deck =
            ObstructionSurface::from_convex_polygon("deck", &deck_pts, ObstructionKind::Building)?;
        deck.kind = ObstructionKind::Walkway;

        let mut scene = open_scene();
        scene.obstructions.push(deck);

        let rose = WindRose::new(vec![1.0 / 16.0; 16]).unwrap();
        let result = eval_wind(&scene, &rose, &SiteConfig::default(), &WindSettings::default())?;
        for v in &result.values {
            assert!((v - 100.0).abs() < 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_obstruction_reduces_sky_and_raises_uhi() -> Result<()> {
        // Overhead slab shades the sensors
        let slab_pts = vec![
            Point::new(-100.0, -100.0, 20.0),
            Point::new(100.0, -100.0, 20.0),
            Point::new(100.0, 100.0, 20.0),
            Point::new(-100.0, 100.0, 20.0),
        ];
        let slab =
            ObstructionSurface::from_convex_polygon("slab", &slab_pts, ObstructionKind::Building)?;
        let mut scene = open_scene();
        scene.obstructions.push(slab);

        let open = eval_uhi(
            &open_scene(),
            SensorClass::Ground,
            &SiteConfig::default(),
            &UhiSettings::default(),
        )?;
        let shaded = eval_uhi(
            &scene,
            SensorClass::Ground,
            &SiteConfig::default(),
            &UhiSettings::default(),
        )?;
        assert!(shaded.values[0] > open.values[0]);

        let sky_open = eval_sky(
            &open_scene(),
            SensorClass::Ground,
            &SiteConfig::default(),
            &SkySettings::default(),
        )?;
        let sky_shaded = eval_sky(
            &scene,
            SensorClass::Ground,
            &SiteConfig::default(),
            &SkySettings::default(),
        )?;
        assert!(sky_shaded.values[0] < sky_open.values[0]);
        Ok(())
    }

    #[test]
    fn test_facade_calibration_applied() -> Result<()> {
        let scene = Scene {
            sensors: vec![facade_cell("f0")],
            obstructions: vec![distant_wall()],
        };
        let result = eval_sky(
            &scene,
            SensorClass::Facade,
            &SiteConfig::default(),
            &SkySettings::default(),
        )?;
        // A facade sees roughly the calibration maximum of the dome; after
        // normalization the value sits in a high but valid band
        assert_eq!(result.values.len(), 1);
        assert!(result.values[0] > 50.0);
        assert!(result.values[0] <= 100.0);
        Ok(())
    }

    #[test]
    fn test_missing_sensors_or_obstructions() {
        let site = SiteConfig::default();
        // No sensors of the requested class
        let scene = Scene {
            sensors: vec![facade_cell("f0")],
            obstructions: vec![distant_wall()],
        };
        let err = eval_solar(&scene, SensorClass::Ground, &site, &SolarSettings::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::Configuration { .. }));

        // No obstructions
        let scene = Scene {
            sensors: vec![ground_cell("g0", 0.0, 0.0)],
            obstructions: vec![],
        };
        let err = eval_sky(&scene, SensorClass::Ground, &site, &SkySettings::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::Configuration { .. }));
    }
}
