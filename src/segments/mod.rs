//! Line segment extraction from an occupancy grid.
//!
//! Segments are found in grid space by a progressive probabilistic Hough
//! transform (see `hough`) and then mapped back to metric sensor-frame
//! coordinates with the grid origin and resolution.
//!
//! - [`GridSegment`]: integer endpoints as reported by the transform.
//! - [`LineSegment`]: metric endpoints with cached line/normal geometry.
//! - [`HoughOptions`]: accumulator resolution, vote threshold, length and gap
//!   limits, expressed in grid cells.
//!
//! An empty extraction is a valid result; callers decide whether it is enough
//! to continue.

mod hough;
mod options;
mod segment;

pub use options::HoughOptions;
pub use segment::{GridSegment, LineSegment};

use crate::error::Result;
use crate::image::{GridOrigin, OccupancyGrid};
use hough::ProbabilisticHough;
use log::debug;
use serde::Serialize;
use std::time::Instant;

/// Segments found on one grid, in grid and metric coordinates.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineExtraction {
    pub grid_segments: Vec<GridSegment>,
    /// Same order as `grid_segments`.
    pub segments: Vec<LineSegment>,
    pub origin: GridOrigin,
    pub resolution: f32,
    /// Grid `(width, height)` in cells.
    pub grid_size: (usize, usize),
    pub elapsed_ms: f64,
}

impl LineExtraction {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

/// Run the probabilistic Hough transform on `grid` and map the resulting
/// segments to metric coordinates.
pub fn extract_lines(grid: &OccupancyGrid, options: &HoughOptions) -> Result<LineExtraction> {
    options.validate()?;
    let start = Instant::now();
    let hough = ProbabilisticHough::new(grid, *options);
    let (num_angle, num_rho) = hough.accumulator_shape();
    let grid_segments = hough.run();
    let segments: Vec<LineSegment> = grid_segments
        .iter()
        .map(|s| to_metric(grid, s))
        .collect();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!(
        "extract_lines: grid={}x{} occupied={} accumulator={}x{} segments={} elapsed_ms={:.3}",
        grid.w,
        grid.h,
        grid.occupied_count(),
        num_angle,
        num_rho,
        segments.len(),
        elapsed_ms
    );
    Ok(LineExtraction {
        grid_segments,
        segments,
        origin: grid.origin,
        resolution: grid.resolution,
        grid_size: (grid.w, grid.h),
        elapsed_ms,
    })
}

fn to_metric(grid: &OccupancyGrid, seg: &GridSegment) -> LineSegment {
    LineSegment::new(
        grid.cell_to_metric(seg.p0[0] as f32, seg.p0[1] as f32),
        grid.cell_to_metric(seg.p1[0] as f32, seg.p1[1] as f32),
    )
}
