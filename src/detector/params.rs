//! Parameters of the fence detector.
//!
//! Every field has a default, so a partial JSON object (or `{}`) deserializes
//! into a usable configuration.

use crate::cluster::ClusterOptions;
use crate::error::{FenceError, Result};
use crate::intersection::DEFAULT_PARALLEL_EPS;
use crate::raster::DEFAULT_RESOLUTION;
use crate::segments::HoughOptions;
use serde::{Deserialize, Serialize};

/// Detector-wide parameters, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Metric edge length of an occupancy grid cell.
    pub resolution: f32,
    /// Line extraction on the grid (distances in cells).
    pub hough: HoughOptions,
    /// Orientation clustering of the extracted segments.
    pub cluster: ClusterOptions,
    /// Relative tolerance below which the representatives count as parallel.
    pub parallel_eps: f64,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            hough: HoughOptions::default(),
            cluster: ClusterOptions::default(),
            parallel_eps: DEFAULT_PARALLEL_EPS,
        }
    }
}

impl DetectorParams {
    pub fn validate(&self) -> Result<()> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(FenceError::InvalidConfig(format!(
                "resolution must be finite and positive (got {})",
                self.resolution
            )));
        }
        if !self.parallel_eps.is_finite() || self.parallel_eps < 0.0 {
            return Err(FenceError::InvalidConfig(format!(
                "parallel_eps must be finite and non-negative (got {})",
                self.parallel_eps
            )));
        }
        self.hough.validate()?;
        self.cluster.validate()
    }
}
