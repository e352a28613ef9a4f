use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;

/// Segment in integer grid coordinates as reported by the Hough stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSegment {
    pub p0: [i32; 2],
    pub p1: [i32; 2],
}

impl GridSegment {
    pub fn new(p0: [i32; 2], p1: [i32; 2]) -> Self {
        Self { p0, p1 }
    }

    /// Larger of the two axis extents, the quantity compared against the
    /// minimum line length.
    pub fn extent(&self) -> i32 {
        (self.p1[0] - self.p0[0])
            .abs()
            .max((self.p1[1] - self.p0[1]).abs())
    }
}

/// Line segment in metric sensor-frame coordinates.
///
/// Derived quantities are computed on first use and cached.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineSegment {
    pub p0: [f32; 2],
    pub p1: [f32; 2],
    #[serde(skip)]
    line: OnceCell<Vector3<f32>>,
    #[serde(skip)]
    direction: OnceCell<[f32; 2]>,
    #[serde(skip)]
    length: OnceCell<f32>,
}

impl PartialEq for LineSegment {
    fn eq(&self, other: &Self) -> bool {
        self.p0 == other.p0 && self.p1 == other.p1
    }
}

impl LineSegment {
    pub fn new(p0: [f32; 2], p1: [f32; 2]) -> Self {
        Self {
            p0,
            p1,
            line: OnceCell::new(),
            direction: OnceCell::new(),
            length: OnceCell::new(),
        }
    }

    fn compute_line(&self) -> Vector3<f32> {
        let a = self.p1[1] - self.p0[1];
        let b = self.p0[0] - self.p1[0];
        let c = self.p1[0] * self.p0[1] - self.p0[0] * self.p1[1];
        let norm = (a * a + b * b).sqrt();
        if norm > 0.0 {
            Vector3::new(a / norm, b / norm, c / norm)
        } else {
            Vector3::zeros()
        }
    }

    /// Line representation: ax + by + c = 0, with sqrt(a^2+b^2)=1
    /// (all zeros for a degenerate segment).
    pub fn line(&self) -> Vector3<f32> {
        *self.line.get_or_init(|| self.compute_line())
    }

    /// Unit normal `(a, b)` of the supporting line.
    pub fn normal(&self) -> [f32; 2] {
        let l = self.line();
        [l.x, l.y]
    }

    /// Orientation of the normal in radians, (-π, π].
    pub fn normal_angle(&self) -> f32 {
        let n = self.normal();
        n[1].atan2(n[0])
    }

    /// Perpendicular distance from the sensor origin to the infinite line.
    pub fn distance_to_origin(&self) -> f32 {
        self.line().z.abs()
    }

    fn compute_length(&self) -> f32 {
        let dx = self.p1[0] - self.p0[0];
        let dy = self.p1[1] - self.p0[1];
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f32 {
        *self.length.get_or_init(|| self.compute_length())
    }

    fn compute_direction(&self) -> [f32; 2] {
        let len = self.length();
        if len > 0.0 {
            [
                (self.p1[0] - self.p0[0]) / len,
                (self.p1[1] - self.p0[1]) / len,
            ]
        } else {
            [0.0, 0.0]
        }
    }

    pub fn direction(&self) -> [f32; 2] {
        *self.direction.get_or_init(|| self.compute_direction())
    }
}
