use serde::{Deserialize, Serialize};

/// Estimated fence corner in the sensor frame.
///
/// `theta` is reserved for the fence orientation and is currently always 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FencePose {
    pub x: f32,
    pub y: f32,
    pub theta: f32,
}

impl FencePose {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, theta: 0.0 }
    }

    pub fn position(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}
