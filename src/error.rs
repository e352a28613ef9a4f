//! Error taxonomy for the fence detection pipeline.
//!
//! Every failure is local and synchronous: a stage either returns its value or
//! one of these kinds, and `FenceDetector::process` surfaces it unchanged.
//! Nothing is retried internally and no partial pose is ever produced.

use thiserror::Error;

/// Failure kinds surfaced by the pipeline stages.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FenceError {
    /// Generated beam angles do not line up with the number of ranges.
    #[error("dimension mismatch: {expected} angles generated for {found} ranges")]
    DimensionMismatch { expected: usize, found: usize },

    /// Partition bounds outside the scan or not strictly increasing.
    #[error("invalid range [{start}, {end}]: {reason}")]
    InvalidRange {
        start: f64,
        end: f64,
        reason: &'static str,
    },

    /// Scan carries no rasterizable sample.
    #[error("scan contains no usable samples")]
    EmptyScan,

    /// Bounding box of the valid points needs more cells than a grid may hold.
    #[error("grid for a {span_x}x{span_y} m extent at resolution {resolution} is too large")]
    GridTooLarge {
        span_x: f32,
        span_y: f32,
        resolution: f32,
    },

    /// Fewer line segments than clustering requires.
    #[error("insufficient segments ({found} < {minimum})")]
    InsufficientSegments { found: usize, minimum: usize },

    /// 2-means collapsed to a single effective orientation.
    #[error("orientation clustering degenerate: {reason}")]
    ClusteringDegenerate { reason: &'static str },

    /// Representative segments are (nearly) parallel.
    #[error("representative lines are parallel (den={den:.3e})")]
    ParallelLines { den: f64 },

    /// Scan message failed schema validation.
    #[error("invalid scan message: {0}")]
    InvalidScan(String),

    /// Detector parameter outside its admissible domain.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, FenceError>;
