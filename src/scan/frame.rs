use super::message::LaserScanMsg;
use crate::error::{FenceError, Result};
use log::debug;
use serde::Serialize;

/// Standard deviation of the range noise within the first metre.
pub const RANGE_NOISE_SIGMA: f32 = 0.03;

/// Fraction of a step below which a trailing partial step is treated as
/// floating-point noise when counting generated angles.
const STEP_TOLERANCE: f64 = 1e-3;

/// Range variance of the sensor noise model: constant up to one metre, then
/// growing with the square of the range.
#[inline]
pub fn range_variance(rho: f32) -> f32 {
    if rho <= 1.0 {
        RANGE_NOISE_SIGMA * RANGE_NOISE_SIGMA
    } else {
        let sigma = RANGE_NOISE_SIGMA * rho;
        sigma * sigma
    }
}

/// Per-beam record of a scan.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScanSample {
    pub theta: f32,
    pub rho: f32,
    pub variance: f32,
    pub x: f32,
    pub y: f32,
}

impl ScanSample {
    pub fn new(theta: f32, rho: f32) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self {
            theta,
            rho,
            variance: range_variance(rho),
            x: rho * cos,
            y: rho * sin,
        }
    }

    /// True when the Cartesian position is usable (no-return beams are
    /// usually reported as `inf` or `NaN`).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// True when the position is finite and the range lies inside
    /// `[range_min, range_max]`.
    #[inline]
    pub fn is_valid(&self, range_min: f32, range_max: f32) -> bool {
        self.is_finite() && self.rho >= range_min && self.rho <= range_max
    }
}

/// Axis-aligned bounding box of the valid Cartesian points of a scan.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScanBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

/// Immutable, normalized range scan.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScanFrame {
    pub(super) angle_min: f32,
    pub(super) angle_max: f32,
    pub(super) angle_increment: f32,
    pub(super) range_min: f32,
    pub(super) range_max: f32,
    pub(super) stamp: f64,
    pub(super) frame_id: String,
    pub(super) samples: Vec<ScanSample>,
}

impl ScanFrame {
    /// Validate a scan message and derive per-beam polar/Cartesian samples.
    pub fn from_message(msg: &LaserScanMsg) -> Result<Self> {
        msg.validate()?;
        let thetas = beam_angles(msg)?;
        let samples: Vec<ScanSample> = thetas
            .iter()
            .zip(msg.ranges.iter())
            .map(|(&theta, &rho)| ScanSample::new(theta, rho))
            .collect();
        debug!(
            "ScanFrame::from_message frame_id={} beams={} angles=[{:.4}, {:.4}]",
            msg.frame_id,
            samples.len(),
            msg.angle_min,
            msg.angle_max
        );
        Ok(Self {
            angle_min: msg.angle_min,
            angle_max: msg.angle_max,
            angle_increment: msg.angle_increment,
            range_min: msg.range_min,
            range_max: msg.range_max,
            stamp: msg.stamp,
            frame_id: msg.frame_id.clone(),
            samples,
        })
    }

    /// Frame over pre-built samples; geometry fields are derived from them.
    #[cfg(test)]
    pub(crate) fn from_samples(samples: Vec<ScanSample>) -> Self {
        let first = samples.first().map_or(0.0, |s| s.theta);
        let last = samples.last().map_or(0.0, |s| s.theta);
        Self {
            angle_min: first,
            angle_max: last,
            angle_increment: 0.0,
            range_min: 0.0,
            range_max: f32::INFINITY,
            stamp: 0.0,
            frame_id: String::new(),
            samples,
        }
    }

    pub fn angle_min(&self) -> f32 {
        self.angle_min
    }

    pub fn angle_max(&self) -> f32 {
        self.angle_max
    }

    pub fn angle_increment(&self) -> f32 {
        self.angle_increment
    }

    pub fn range_min(&self) -> f32 {
        self.range_min
    }

    pub fn range_max(&self) -> f32 {
        self.range_max
    }

    pub fn stamp(&self) -> f64 {
        self.stamp
    }

    pub fn frame_id(&self) -> &str {
        &self.frame_id
    }

    pub fn samples(&self) -> &[ScanSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Beam angles in scan order.
    pub fn thetas(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().map(|s| s.theta)
    }

    /// Measured ranges in scan order.
    pub fn rhos(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().map(|s| s.rho)
    }

    /// Cartesian points in scan order, including non-finite ones.
    pub fn points(&self) -> impl Iterator<Item = [f32; 2]> + '_ {
        self.samples.iter().map(|s| [s.x, s.y])
    }

    /// Samples with a finite position and a range inside the frame's limits.
    pub fn valid_samples(&self) -> impl Iterator<Item = &ScanSample> + '_ {
        self.samples
            .iter()
            .filter(move |s| s.is_valid(self.range_min, self.range_max))
    }

    /// Bounding box over valid points; `None` if there are none.
    pub fn bounds(&self) -> Option<ScanBounds> {
        self.valid_samples()
            .fold(None, |acc: Option<ScanBounds>, s| {
                Some(match acc {
                    None => ScanBounds {
                        min_x: s.x,
                        min_y: s.y,
                        max_x: s.x,
                        max_y: s.y,
                    },
                    Some(b) => ScanBounds {
                        min_x: b.min_x.min(s.x),
                        min_y: b.min_y.min(s.y),
                        max_x: b.max_x.max(s.x),
                        max_y: b.max_y.max(s.y),
                    },
                })
            })
    }
}

/// Evenly spaced values in `[start, stop)`; length `ceil((stop - start) / step)`.
fn arange(start: f64, stop: f64, step: f64) -> Vec<f32> {
    let count = ((stop - start) / step - STEP_TOLERANCE).ceil();
    if count.is_nan() || count <= 0.0 {
        return Vec::new();
    }
    (0..count as usize)
        .map(|i| (start + i as f64 * step) as f32)
        .collect()
}

fn beam_angles(msg: &LaserScanMsg) -> Result<Vec<f32>> {
    let start = msg.angle_min as f64;
    let stop = msg.angle_max as f64;
    let step = msg.angle_increment as f64;
    let expected = msg.ranges.len();

    let exclusive = arange(start, stop, step);
    if exclusive.len() == expected {
        return Ok(exclusive);
    }
    let inclusive = arange(start, stop + step, step);
    if inclusive.len() == expected {
        return Ok(inclusive);
    }
    debug!(
        "beam_angles: {} exclusive / {} inclusive angles for {} ranges",
        exclusive.len(),
        inclusive.len(),
        expected
    );
    Err(FenceError::DimensionMismatch {
        expected: inclusive.len(),
        found: expected,
    })
}
