use super::frame::ScanFrame;
use crate::error::{FenceError, Result};

impl ScanFrame {
    /// Sub-scan over the inclusive sample range `[start, end]`.
    ///
    /// Angle bounds are taken from the boundary samples and the range bounds
    /// become the min/max measured range over the selected samples that are
    /// valid in `self`. A selection without valid samples keeps the parent's
    /// range bounds.
    pub fn partition_by_index(&self, start: usize, end: usize) -> Result<ScanFrame> {
        let invalid = |reason| FenceError::InvalidRange {
            start: start as f64,
            end: end as f64,
            reason,
        };
        if end >= self.samples.len() {
            return Err(invalid("end index must be < len(scan)"));
        }
        if start >= end {
            return Err(invalid("start must be < end"));
        }

        let samples = self.samples[start..=end].to_vec();
        let (range_min, range_max) = samples
            .iter()
            .filter(|s| s.is_valid(self.range_min, self.range_max))
            .fold(None, |acc: Option<(f32, f32)>, s| {
                Some(acc.map_or((s.rho, s.rho), |(lo, hi)| {
                    (lo.min(s.rho), hi.max(s.rho))
                }))
            })
            .unwrap_or((self.range_min, self.range_max));

        Ok(ScanFrame {
            angle_min: samples[0].theta,
            angle_max: samples[samples.len() - 1].theta,
            angle_increment: self.angle_increment,
            range_min,
            range_max,
            stamp: self.stamp,
            frame_id: self.frame_id.clone(),
            samples,
        })
    }

    /// Sub-scan covering the angular interval `[start, end]`.
    ///
    /// The first sample is the last beam at or before `start`, the last sample
    /// the first beam at or after `end` (clamped to the final beam).
    pub fn partition_by_angle(&self, start: f32, end: f32) -> Result<ScanFrame> {
        let invalid = |reason| FenceError::InvalidRange {
            start: start as f64,
            end: end as f64,
            reason,
        };
        if start < self.angle_min {
            return Err(invalid("start angle must be >= angle_min"));
        }
        if end > self.angle_max {
            return Err(invalid("end angle must be <= angle_max"));
        }
        if start >= end {
            return Err(invalid("start must be < end"));
        }

        let last = self.samples.len().saturating_sub(1);
        let index_min = self
            .samples
            .partition_point(|s| s.theta <= start)
            .saturating_sub(1);
        let index_max = self.samples.partition_point(|s| s.theta < end).min(last);
        if index_min >= index_max {
            return Err(invalid("interval contains no beam pair"));
        }
        self.partition_by_index(index_min, index_max)
    }
}
