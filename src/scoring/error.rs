//! Engine-internal error taxonomy.
//!
//! Errors here are scoped to a single metric: the aggregation engine logs
//! them and drops that metric, never the whole run. Missing landmarks are
//! deliberately not an error (partial profiles are expected).

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScoreError {
    /// Registry lookup miss.
    #[error("unknown metric id '{0}'")]
    UnknownMetric(String),

    /// Malformed custom-curve configuration. Scoring falls back to the
    /// exponential model for the affected metric.
    #[error("invalid scoring curve for metric '{metric}': {reason}")]
    InvalidCurve { metric: String, reason: String },

    /// A registry entry violating the `MetricConfig` invariants.
    #[error("invalid config for metric '{metric}': {reason}")]
    InvalidConfig { metric: String, reason: String },
}
