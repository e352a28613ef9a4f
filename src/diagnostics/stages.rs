use crate::angle::angular_difference;
use crate::cluster::{Cluster, OrientationClusters};
use crate::image::{GridOrigin, OccupancyGrid};
use crate::scan::ScanFrame;
use crate::segments::{GridSegment, LineExtraction, LineSegment};
use serde::Serialize;

/// Outcome of rasterizing the scan.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterStage {
    pub elapsed_ms: f64,
    pub width: usize,
    pub height: usize,
    pub resolution: f32,
    pub origin: GridOrigin,
    pub occupied_cells: usize,
}

impl RasterStage {
    pub fn from_grid(grid: &OccupancyGrid, elapsed_ms: f64) -> Self {
        Self {
            elapsed_ms,
            width: grid.w,
            height: grid.h,
            resolution: grid.resolution,
            origin: grid.origin,
            occupied_cells: grid.occupied_count(),
        }
    }
}

/// Segments reported by the Hough transform, in both coordinate systems.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoughStage {
    pub elapsed_ms: f64,
    pub grid_segments: Vec<GridSegment>,
    pub segments: Vec<LineSegment>,
}

impl HoughStage {
    pub fn from_extraction(extraction: &LineExtraction) -> Self {
        Self {
            elapsed_ms: extraction.elapsed_ms,
            grid_segments: extraction.grid_segments.clone(),
            segments: extraction.segments.clone(),
        }
    }
}

/// Orientation families and their representatives.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStage {
    pub elapsed_ms: f64,
    pub iterations: usize,
    pub labels: Vec<usize>,
    pub front: Cluster,
    pub side: Cluster,
    /// Angle between the two mean orientations, in [0, π/2].
    pub separation: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front_line: Option<LineSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_line: Option<LineSegment>,
}

impl ClusterStage {
    pub fn new(clusters: &OrientationClusters, segments: &[LineSegment], elapsed_ms: f64) -> Self {
        Self {
            elapsed_ms,
            iterations: clusters.iterations,
            labels: clusters.labels.clone(),
            front: clusters.front.clone(),
            side: clusters.side.clone(),
            separation: angular_difference(clusters.front.mean_angle, clusters.side.mean_angle),
            front_line: segments.get(clusters.front.representative).cloned(),
            side_line: segments.get(clusters.side.representative).cloned(),
        }
    }
}

/// Summary of the scan message fed to the detector.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub frame_id: String,
    pub stamp: f64,
    pub beams: usize,
    /// Beams with a finite position inside the range limits.
    pub valid_beams: usize,
    pub angle_min: f32,
    pub angle_max: f32,
    pub angle_increment: f32,
}

impl InputDescriptor {
    pub fn from_frame(frame: &ScanFrame) -> Self {
        Self {
            frame_id: frame.frame_id().to_string(),
            stamp: frame.stamp(),
            beams: frame.len(),
            valid_beams: frame.valid_samples().count(),
            angle_min: frame.angle_min(),
            angle_max: frame.angle_max(),
            angle_increment: frame.angle_increment(),
        }
    }
}
