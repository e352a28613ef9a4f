//! Orientation clustering of metric line segments.
//!
//! Each segment's unit normal is embedded on the doubled-angle circle (see
//! [`crate::angle::axial_embedding`]) so that a normal and its negation are the
//! same feature. A deterministic 2-means splits the features into two
//! orientation families, and each family is summarized by the member whose
//! supporting line passes closest to the sensor.
//!
//! The family whose representative normal is more aligned with the sensor x
//! axis is labelled the front, the other one the side.

mod kmeans;

use crate::angle::{axial_angle, axial_embedding};
use crate::error::{FenceError, Result};
use crate::segments::LineSegment;
use log::debug;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Minimum number of segments needed to form two clusters.
pub const MIN_SEGMENTS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterOptions {
    /// Upper bound on Lloyd assignment passes.
    pub max_iterations: usize,
    /// Features spread less than this (chord length on the unit circle) are
    /// treated as a single orientation.
    pub degenerate_eps: f32,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            degenerate_eps: 1e-3,
        }
    }
}

impl ClusterOptions {
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(FenceError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !self.degenerate_eps.is_finite() || self.degenerate_eps < 0.0 {
            return Err(FenceError::InvalidConfig(format!(
                "degenerate_eps must be finite and non-negative (got {})",
                self.degenerate_eps
            )));
        }
        Ok(())
    }
}

/// One orientation family.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    /// Indices into the clustered segment slice, ascending.
    pub members: Vec<usize>,
    /// Member whose line is closest to the sensor origin.
    pub representative: usize,
    /// Mean normal orientation of the members in [0, π).
    pub mean_angle: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationClusters {
    /// Per segment: 0 for the front family, 1 for the side family.
    pub labels: Vec<usize>,
    pub front: Cluster,
    pub side: Cluster,
    pub iterations: usize,
}

impl OrientationClusters {
    pub const FRONT: usize = 0;
    pub const SIDE: usize = 1;
}

/// Split `segments` into two orientation families.
pub fn cluster_orientations(
    segments: &[LineSegment],
    options: &ClusterOptions,
) -> Result<OrientationClusters> {
    options.validate()?;
    if segments.len() < MIN_SEGMENTS {
        debug!(
            "cluster_orientations: {} segments, need at least {}",
            segments.len(),
            MIN_SEGMENTS
        );
        return Err(FenceError::InsufficientSegments {
            found: segments.len(),
            minimum: MIN_SEGMENTS,
        });
    }

    let features: Vec<Vector2<f32>> = segments
        .iter()
        .map(|s| Vector2::from(axial_embedding(s.normal_angle())))
        .collect();
    let result = kmeans::two_means(&features, options.max_iterations, options.degenerate_eps)
        .inspect_err(|err| debug!("cluster_orientations: {err}"))?;

    let mut clusters = [0usize, 1].map(|label| {
        let members: Vec<usize> = result
            .labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == label)
            .map(|(i, _)| i)
            .collect();
        let c = result.centroids[label];
        Cluster {
            representative: closest_to_origin(segments, &members),
            members,
            mean_angle: axial_angle([c.x, c.y]),
        }
    });

    let alignment = |c: &Cluster| segments[c.representative].normal()[0].abs();
    if alignment(&clusters[1]) > alignment(&clusters[0]) {
        clusters.swap(0, 1);
    }
    let [front, side] = clusters;

    let mut labels = vec![OrientationClusters::SIDE; segments.len()];
    for &i in &front.members {
        labels[i] = OrientationClusters::FRONT;
    }
    debug!(
        "cluster_orientations: front={} (rep {}, angle {:.3}) side={} (rep {}, angle {:.3}) iterations={}",
        front.members.len(),
        front.representative,
        front.mean_angle,
        side.members.len(),
        side.representative,
        side.mean_angle,
        result.iterations
    );
    Ok(OrientationClusters {
        labels,
        front,
        side,
        iterations: result.iterations,
    })
}

/// Member with minimal line distance to the origin; lowest index on ties.
fn closest_to_origin(segments: &[LineSegment], members: &[usize]) -> usize {
    let mut best = members[0];
    for &i in &members[1..] {
        if segments[i].distance_to_origin() < segments[best].distance_to_origin() {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn seg(p0: [f32; 2], p1: [f32; 2]) -> LineSegment {
        LineSegment::new(p0, p1)
    }

    /// Two walls parallel to the y axis (x = 2, x = 3) interleaved with two
    /// walls parallel to the x axis (y = 1, y = 1.5).
    fn corner_segments() -> Vec<LineSegment> {
        vec![
            seg([2.0, -1.0], [2.0, 1.0]),
            seg([0.5, 1.0], [2.0, 1.0]),
            seg([3.0, 0.0], [3.0, 2.0]),
            seg([2.0, 1.5], [0.0, 1.5]),
        ]
    }

    #[test]
    fn perpendicular_groups_are_separated() {
        let segments = corner_segments();
        let out = cluster_orientations(&segments, &ClusterOptions::default()).expect("clusters");
        assert_eq!(out.front.members, vec![0, 2]);
        assert_eq!(out.side.members, vec![1, 3]);
        assert_eq!(out.labels, vec![0, 1, 0, 1]);
        assert_eq!(out.front.representative, 0);
        assert_eq!(out.side.representative, 1);
        assert!(out.front.mean_angle.abs() < 1e-4);
        assert!((out.side.mean_angle - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn segment_direction_does_not_matter() {
        let mut segments = corner_segments();
        let flipped = seg(segments[2].p1, segments[2].p0);
        segments[2] = flipped;
        let out = cluster_orientations(&segments, &ClusterOptions::default()).expect("clusters");
        assert_eq!(out.front.members, vec![0, 2]);
    }

    #[test]
    fn noisy_orientations_still_split() {
        let segments = vec![
            seg([2.0, -1.0], [2.05, 1.0]),
            seg([0.5, 1.0], [2.0, 1.04]),
            seg([3.0, 0.0], [2.96, 2.0]),
            seg([2.0, 1.5], [0.0, 1.45]),
            seg([2.5, -0.5], [2.52, 0.5]),
        ];
        let out = cluster_orientations(&segments, &ClusterOptions::default()).expect("clusters");
        assert_eq!(out.front.members, vec![0, 2, 4]);
        assert_eq!(out.side.members, vec![1, 3]);
        let again = cluster_orientations(&segments, &ClusterOptions::default()).expect("clusters");
        assert_eq!(out, again);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn too_few_segments(#[case] n: usize) {
        let segments: Vec<_> = corner_segments().into_iter().take(n).collect();
        assert_eq!(
            cluster_orientations(&segments, &ClusterOptions::default()).unwrap_err(),
            FenceError::InsufficientSegments {
                found: n,
                minimum: 2
            }
        );
    }

    #[test]
    fn parallel_segments_are_degenerate() {
        let segments = vec![
            seg([2.0, -1.0], [2.0, 1.0]),
            seg([3.0, 0.0], [3.0, 2.0]),
            seg([4.0, 1.0], [4.0, 0.0]),
        ];
        assert!(matches!(
            cluster_orientations(&segments, &ClusterOptions::default()),
            Err(FenceError::ClusteringDegenerate { .. })
        ));
    }
}
