use crate::error::{FenceError, Result};
use serde::{Deserialize, Serialize};

/// One range scan as delivered by the external sensor feed.
///
/// Field names follow the common `LaserScan` layout so that recorded scans can
/// be deserialized directly from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaserScanMsg {
    /// Angle of the first beam (radians).
    pub angle_min: f32,
    /// Angle of the last beam (radians).
    pub angle_max: f32,
    /// Angular step between beams (radians, > 0).
    pub angle_increment: f32,
    /// Minimum valid range (metres).
    pub range_min: f32,
    /// Maximum valid range (metres).
    pub range_max: f32,
    /// Measured ranges ordered by increasing angle.
    pub ranges: Vec<f32>,
    /// Acquisition time in seconds.
    #[serde(default)]
    pub stamp: f64,
    /// Frame the scan is expressed in.
    #[serde(default)]
    pub frame_id: String,
}

impl LaserScanMsg {
    /// Checks the scalar geometry fields before any derived data is built.
    pub fn validate(&self) -> Result<()> {
        if !self.angle_min.is_finite() || !self.angle_max.is_finite() {
            return Err(FenceError::InvalidScan(format!(
                "angle bounds must be finite (min={}, max={})",
                self.angle_min, self.angle_max
            )));
        }
        if !self.angle_increment.is_finite() || self.angle_increment <= 0.0 {
            return Err(FenceError::InvalidScan(format!(
                "angle_increment must be finite and positive (got {})",
                self.angle_increment
            )));
        }
        if self.angle_max < self.angle_min {
            return Err(FenceError::InvalidScan(format!(
                "angle_max ({}) is below angle_min ({})",
                self.angle_max, self.angle_min
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg() -> LaserScanMsg {
        LaserScanMsg {
            angle_min: -1.0,
            angle_max: 1.0,
            angle_increment: 0.5,
            range_min: 0.1,
            range_max: 10.0,
            ranges: vec![1.0; 5],
            stamp: 0.0,
            frame_id: "laser".into(),
        }
    }

    #[test]
    fn accepts_regular_geometry() {
        assert!(msg().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_increment() {
        let mut m = msg();
        m.angle_increment = 0.0;
        assert!(matches!(m.validate(), Err(FenceError::InvalidScan(_))));
        m.angle_increment = f32::NAN;
        assert!(matches!(m.validate(), Err(FenceError::InvalidScan(_))));
    }

    #[test]
    fn deserializes_without_optional_header() {
        let json = r#"{
            "angle_min": 0.0, "angle_max": 1.0, "angle_increment": 0.5,
            "range_min": 0.0, "range_max": 5.0, "ranges": [1.0, 2.0, 3.0]
        }"#;
        let m: LaserScanMsg = serde_json::from_str(json).expect("parse");
        assert_eq!(m.ranges.len(), 3);
        assert!(m.frame_id.is_empty());
    }
}
