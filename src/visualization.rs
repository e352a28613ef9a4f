//! Line-list marker payload for external renderers.
//!
//! Plain serializable data; publishing it is left to whatever transport the
//! caller uses.
use crate::segments::LineSegment;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    pub const GREEN: Self = Self {
        r: 0.0,
        g: 1.0,
        b: 0.0,
        a: 1.0,
    };
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    #[default]
    LineList,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerAction {
    #[default]
    Add,
}

/// Segments as consecutive endpoint pairs: `points[2k]` and `points[2k + 1]`
/// are the two ends of segment `k`, with z = 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineListMarker {
    pub frame_id: String,
    pub stamp: f64,
    pub namespace: String,
    pub id: i32,
    pub kind: MarkerKind,
    pub action: MarkerAction,
    pub line_width: f32,
    pub color: ColorRgba,
    /// Display lifetime in seconds, 0 = forever.
    pub lifetime: f64,
    pub points: Vec<[f32; 3]>,
}

impl LineListMarker {
    pub const NAMESPACE: &'static str = "hough_lines";
    pub const LINE_WIDTH: f32 = 0.01;

    pub fn from_segments(segments: &[LineSegment], frame_id: &str, stamp: f64) -> Self {
        let points = segments
            .iter()
            .flat_map(|s| [[s.p0[0], s.p0[1], 0.0], [s.p1[0], s.p1[1], 0.0]])
            .collect();
        Self {
            frame_id: frame_id.to_string(),
            stamp,
            namespace: Self::NAMESPACE.to_string(),
            id: 0,
            kind: MarkerKind::LineList,
            action: MarkerAction::Add,
            line_width: Self::LINE_WIDTH,
            color: ColorRgba::GREEN,
            lifetime: 0.0,
            points,
        }
    }

    pub fn segment_count(&self) -> usize {
        self.points.len() / 2
    }
}
