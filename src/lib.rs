pub mod error;
pub mod geom;
pub mod scene;
pub mod sim;

// Prelude
pub use error::EngineError;
pub use geom::point::Point;
pub use geom::vector::Vector;
pub use scene::{
    ObstructionKind, ObstructionSurface, Scene, SensorClass, SensorSurface, SurfaceClass, WindRose,
};
pub use sim::evaluate::evaluate;
pub use sim::index::GeometryIndex;
pub use sim::run::{eval_sky, eval_solar, eval_uhi, eval_wind, AnalysisResult};
pub use sim::sampling::{DirectionSample, DirectionSamples};
pub use sim::score::{mean_aggregate, score, ScoreResult};
pub use sim::sensors::{build_sensor_rays, SensorRay};
pub use sim::settings::{Metric, SiteConfig, SkySettings, SolarSettings, UhiSettings, WindSettings};
