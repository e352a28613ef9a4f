use crate::error::{FenceError, Result};
use serde::{Deserialize, Serialize};

/// Parameters of the probabilistic Hough line detector.
///
/// Distances and lengths are expressed in grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughOptions {
    /// Distance resolution of the accumulator (cells).
    pub pixel_resolution: f32,
    /// Angle resolution of the accumulator (radians).
    pub theta_resolution: f32,
    /// Minimum votes for a line hypothesis to be walked.
    pub accumulator_threshold: u32,
    /// Minimum segment extent along x or y (cells).
    pub min_line_length: u32,
    /// Maximum run of free cells bridged while walking a line (cells).
    pub max_line_gap: u32,
    /// Stop after this many segments; `None` keeps going until every
    /// occupied cell has been visited.
    pub max_lines: Option<usize>,
    /// Seed of the cell visiting order.
    pub seed: u64,
}

impl Default for HoughOptions {
    fn default() -> Self {
        Self {
            pixel_resolution: 5.0,
            theta_resolution: std::f32::consts::PI / 180.0,
            accumulator_threshold: 40,
            min_line_length: 100,
            max_line_gap: 100,
            max_lines: None,
            seed: 0x5eed_f3c3,
        }
    }
}

impl HoughOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.pixel_resolution.is_finite() || self.pixel_resolution <= 0.0 {
            return Err(FenceError::InvalidConfig(format!(
                "pixel_resolution must be finite and positive (got {})",
                self.pixel_resolution
            )));
        }
        if !self.theta_resolution.is_finite()
            || self.theta_resolution <= 0.0
            || self.theta_resolution > std::f32::consts::PI
        {
            return Err(FenceError::InvalidConfig(format!(
                "theta_resolution must lie in (0, pi] (got {})",
                self.theta_resolution
            )));
        }
        if self.accumulator_threshold == 0 {
            return Err(FenceError::InvalidConfig(
                "accumulator_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
