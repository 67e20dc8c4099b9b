use thiserror::Error;

/// Fatal errors raised by the exposure engine.
///
/// There are no partial results and no retries: every variant aborts the
/// analysis run it occurred in and propagates to the caller.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The inputs to an analysis are unusable (empty sensor set, empty
    /// obstruction set, invalid wind rose or layer schedule). Raised before
    /// any raycasting happens.
    #[error("configuration error in {analysis}: {reason}")]
    Configuration { analysis: String, reason: String },

    /// The number of computed values does not match the number of sensors.
    /// Indicates an internal inconsistency, e.g. a filtering bug upstream.
    #[error(
        "result mismatch in {analysis}: number of sensors = {num_sensors}, \
         number of results = {num_values}"
    )]
    ResultMismatch {
        analysis: String,
        num_sensors: usize,
        num_values: usize,
    },

    /// Total sensor area is zero, so neither the score percentage nor an
    /// area-weighted mean is defined.
    #[error("zero total sensor area")]
    ZeroArea,
}

impl EngineError {
    pub(crate) fn configuration(analysis: &str, reason: &str) -> Self {
        Self::Configuration {
            analysis: analysis.to_string(),
            reason: reason.to_string(),
        }
    }
}
