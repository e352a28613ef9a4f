//! Rasterization of scan points into an [`OccupancyGrid`].
//!
//! Only valid samples take part: a finite position and a range inside the
//! frame's `[range_min, range_max]`. The grid spans their bounding box with
//! `ceil((max - min) / resolution) + 1` cells per axis, at most
//! [`MAX_GRID_CELLS`] in total. A point `(x, y)` lands in cell
//! `(ceil((x - min_x) / r), ceil((y - min_y) / r))`; several points in the
//! same cell leave it occupied, no counts are kept.
use crate::error::{FenceError, Result};
use crate::image::{GridOrigin, OccupancyGrid};
use crate::scan::ScanFrame;
use log::debug;

/// Default metric edge length of a grid cell.
pub const DEFAULT_RESOLUTION: f32 = 0.01;

/// Upper bound on `w * h` of a rasterized grid.
pub const MAX_GRID_CELLS: usize = 1 << 28;

/// Rasterize the valid points of `scan` at `resolution` metres per cell.
pub fn rasterize(scan: &ScanFrame, resolution: f32) -> Result<OccupancyGrid> {
    if !resolution.is_finite() || resolution <= 0.0 {
        return Err(FenceError::InvalidConfig(format!(
            "grid resolution must be finite and positive (got {resolution})"
        )));
    }
    if scan.is_empty() {
        return Err(FenceError::EmptyScan);
    }
    let bounds = scan.bounds().ok_or_else(|| {
        debug!(
            "rasterize: none of the {} samples is finite and within range limits",
            scan.len()
        );
        FenceError::EmptyScan
    })?;

    let inv = 1.0 / resolution;
    let span_x = bounds.max_x - bounds.min_x;
    let span_y = bounds.max_y - bounds.min_y;
    let too_large = || {
        debug!("rasterize: {span_x:.3}x{span_y:.3} m at res={resolution} exceeds the cell limit");
        FenceError::GridTooLarge {
            span_x,
            span_y,
            resolution,
        }
    };
    let w = cells_for_span(span_x, inv).ok_or_else(too_large)?;
    let h = cells_for_span(span_y, inv).ok_or_else(too_large)?;
    match w.checked_mul(h) {
        Some(cells) if cells <= MAX_GRID_CELLS => {}
        _ => return Err(too_large()),
    }
    let origin = GridOrigin {
        min_x: bounds.min_x,
        min_y: bounds.min_y,
    };
    let mut grid = OccupancyGrid::new(w, h, origin, resolution);

    let mut marked = 0usize;
    for s in scan.valid_samples() {
        let cx = quantize(s.x - bounds.min_x, inv, w);
        let cy = quantize(s.y - bounds.min_y, inv, h);
        grid.mark(cx, cy);
        marked += 1;
    }
    debug!(
        "rasterize: {} points -> {}x{} grid (res={:.4}, occupied={})",
        marked,
        w,
        h,
        resolution,
        grid.occupied_count()
    );
    Ok(grid)
}

/// Cell count along one axis; `None` when it is not representable.
#[inline]
fn cells_for_span(span: f32, inv_resolution: f32) -> Option<usize> {
    let cells = (f64::from(span) * f64::from(inv_resolution)).ceil();
    if !cells.is_finite() || cells >= MAX_GRID_CELLS as f64 {
        return None;
    }
    (cells as usize).checked_add(1)
}

#[inline]
fn quantize(offset: f32, inv_resolution: f32, cells: usize) -> usize {
    // offsets are >= 0 by construction; the clamp only absorbs rounding at the
    // far edge of the bounding box
    ((offset * inv_resolution).ceil().max(0.0) as usize).min(cells - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{LaserScanMsg, ScanSample};

    fn scan_msg(ranges: Vec<f32>, angle_increment: f32) -> LaserScanMsg {
        let n = ranges.len();
        LaserScanMsg {
            angle_min: 0.0,
            angle_max: angle_increment * (n as f32 - 1.0),
            angle_increment,
            range_min: 0.0,
            range_max: 10.0,
            ranges,
            stamp: 0.0,
            frame_id: String::new(),
        }
    }

    fn scan(ranges: Vec<f32>, angle_increment: f32) -> ScanFrame {
        ScanFrame::from_message(&scan_msg(ranges, angle_increment)).expect("frame")
    }

    #[test]
    fn single_point_occupies_single_cell_at_origin() {
        let frame = scan(vec![1.5], 0.1);
        let grid = rasterize(&frame, 0.01).expect("grid");
        assert_eq!((grid.w, grid.h), (1, 1));
        assert_eq!(grid.occupied_count(), 1);
        assert!(grid.is_occupied(0, 0));
        assert!((grid.origin.min_x - 1.5).abs() < 1e-6);
    }

    fn at(x: f32, y: f32) -> ScanSample {
        ScanSample {
            theta: y.atan2(x),
            rho: (x * x + y * y).sqrt(),
            variance: 0.0,
            x,
            y,
        }
    }

    #[test]
    fn grid_dimensions_follow_bounding_box() {
        let frame = ScanFrame::from_samples(vec![at(1.0, 0.0), at(0.0, 2.0)]);
        let grid = rasterize(&frame, 0.1).expect("grid");
        assert_eq!(grid.w, 11);
        assert_eq!(grid.h, 21);
        assert_eq!(grid.occupied_count(), 2);
        assert!(grid.is_occupied(10, 0));
        assert!(grid.is_occupied(0, 20));
    }

    #[test]
    fn colliding_points_do_not_accumulate() {
        // ceil quantization: offsets in (0, r] share cell 1
        let frame = ScanFrame::from_samples(vec![at(0.0, 0.0), at(0.01, 0.0), at(0.04, 0.0)]);
        let grid = rasterize(&frame, 0.05).expect("grid");
        assert_eq!((grid.w, grid.h), (2, 1));
        assert_eq!(grid.occupied_count(), 2);
        assert!(grid.is_occupied(0, 0));
        assert!(grid.is_occupied(1, 0));
    }

    #[test]
    fn empty_and_non_finite_scans_fail() {
        let msg = LaserScanMsg {
            angle_min: 0.0,
            angle_max: 0.0,
            angle_increment: 0.1,
            range_min: 0.0,
            range_max: 10.0,
            ranges: vec![],
            stamp: 0.0,
            frame_id: String::new(),
        };
        let empty = ScanFrame::from_message(&msg).expect("frame");
        assert_eq!(rasterize(&empty, 0.01).unwrap_err(), FenceError::EmptyScan);

        let blind = scan(vec![f32::INFINITY, f32::NAN], 0.1);
        assert_eq!(rasterize(&blind, 0.01).unwrap_err(), FenceError::EmptyScan);
    }

    #[test]
    fn beams_outside_range_limits_are_ignored() {
        let mut ranges = vec![2.0; 100];
        ranges[50] = 120.0;
        ranges[10] = 0.01;
        let mut msg = scan_msg(ranges, 0.002);
        msg.range_min = 0.05;
        msg.range_max = 30.0;
        let frame = ScanFrame::from_message(&msg).expect("frame");

        let grid = rasterize(&frame, 0.01).expect("grid");
        // 98 beams on a 0.2 rad arc of radius 2 m
        assert!(grid.w < 10, "grid width {}", grid.w);
        assert!(grid.h < 50, "grid height {}", grid.h);
        assert!(grid.origin.min_x > 1.9);
        assert!(grid.occupied_count() <= 98);
    }

    #[test]
    fn oversized_grid_is_an_error() {
        let frame = ScanFrame::from_samples(vec![at(0.0, 0.0), at(1.0e30, 1.0e30)]);
        assert!(matches!(
            rasterize(&frame, 0.01),
            Err(FenceError::GridTooLarge { .. })
        ));

        // each axis fits, the product does not
        let frame = ScanFrame::from_samples(vec![at(0.0, 0.0), at(200.0, 200.0)]);
        assert!(matches!(
            rasterize(&frame, 0.01),
            Err(FenceError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_resolution() {
        let frame = scan(vec![1.0], 0.1);
        assert!(matches!(
            rasterize(&frame, 0.0),
            Err(FenceError::InvalidConfig(_))
        ));
    }
}
