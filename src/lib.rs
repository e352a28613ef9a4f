#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod scan;
pub mod types;
pub mod visualization;

// Stage modules, usable on their own.
pub mod angle;
pub mod cluster;
pub mod config;
pub mod image;
pub mod intersection;
pub mod raster;
pub mod segments;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{DetectorParams, FenceDetector};
pub use crate::error::{FenceError, Result};
pub use crate::scan::{LaserScanMsg, ScanFrame};
pub use crate::types::FencePose;

// High-level diagnostics returned by the detector.
pub use crate::diagnostics::{DetectionReport, PipelineTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use fence_detector::prelude::*;
///
/// # fn main() {
/// let msg = LaserScanMsg {
///     angle_min: -1.0,
///     angle_max: 1.0,
///     angle_increment: 0.01,
///     range_min: 0.05,
///     range_max: 10.0,
///     ranges: vec![2.0; 201],
///     stamp: 0.0,
///     frame_id: "laser".into(),
/// };
///
/// let detector = FenceDetector::new(DetectorParams::default());
/// match detector.process(&msg) {
///     Ok(pose) => println!("corner=({:.3}, {:.3})", pose.x, pose.y),
///     Err(err) => println!("no corner: {err}"),
/// }
/// # }
/// ```
pub mod prelude {
    pub use crate::segments::LineSegment;
    pub use crate::visualization::LineListMarker;
    pub use crate::{DetectorParams, FenceDetector, FenceError, FencePose, LaserScanMsg};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    // Stage runners.
    pub use crate::cluster::cluster_orientations;
    pub use crate::intersection::{fence_pose, intersect};
    pub use crate::raster::rasterize;
    pub use crate::segments::extract_lines;

    // Stage inputs and outputs.
    pub use crate::cluster::{Cluster, ClusterOptions, OrientationClusters};
    pub use crate::image::{GridOrigin, OccupancyGrid};
    pub use crate::segments::{GridSegment, HoughOptions, LineExtraction, LineSegment};

    // Structured diagnostics types.
    pub use crate::diagnostics::{
        ClusterStage, HoughStage, InputDescriptor, RasterStage, StageTiming, TimingBreakdown,
    };
}
