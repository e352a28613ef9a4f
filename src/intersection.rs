//! Intersection of the infinite lines supporting two segments.
//!
//! Uses the determinant form of the two-point line intersection, evaluated in
//! `f64` so that metric coordinates of a few metres keep full `f32` precision
//! in the result.
use crate::cluster::OrientationClusters;
use crate::error::{FenceError, Result};
use crate::segments::LineSegment;
use crate::types::FencePose;
use log::debug;

/// Default relative tolerance of the parallel-line test.
pub const DEFAULT_PARALLEL_EPS: f64 = 1e-6;

/// Intersection point of the lines through `a` and `b`.
///
/// The lines are rejected as parallel when `|den| <= eps * len(a) * len(b)`,
/// i.e. when the sine of the angle between them is at most `eps`. A
/// zero-length segment therefore always counts as parallel.
pub fn intersect(a: &LineSegment, b: &LineSegment, eps: f64) -> Result<[f32; 2]> {
    let (x1, y1) = (a.p0[0] as f64, a.p0[1] as f64);
    let (x2, y2) = (a.p1[0] as f64, a.p1[1] as f64);
    let (x3, y3) = (b.p0[0] as f64, b.p0[1] as f64);
    let (x4, y4) = (b.p1[0] as f64, b.p1[1] as f64);

    let den = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    let scale = (x1 - x2).hypot(y1 - y2) * (x3 - x4).hypot(y3 - y4);
    if den.abs() <= eps * scale {
        debug!("intersect: near-parallel lines den={den:.3e} scale={scale:.3e}");
        return Err(FenceError::ParallelLines { den });
    }

    let d1 = x1 * y2 - y1 * x2;
    let d2 = x3 * y4 - y3 * x4;
    let px = (d1 * (x3 - x4) - (x1 - x2) * d2) / den;
    let py = (d1 * (y3 - y4) - (y1 - y2) * d2) / den;
    Ok([px as f32, py as f32])
}

/// Fence corner at the intersection of the front and side representatives.
pub fn fence_pose(front: &LineSegment, side: &LineSegment, eps: f64) -> Result<FencePose> {
    let [x, y] = intersect(front, side, eps)?;
    Ok(FencePose::new(x, y))
}

/// [`fence_pose`] for the representatives selected by the clusterer.
pub fn pose_from_clusters(
    segments: &[LineSegment],
    clusters: &OrientationClusters,
    eps: f64,
) -> Result<FencePose> {
    fence_pose(
        &segments[clusters.front.representative],
        &segments[clusters.side.representative],
        eps,
    )
}
