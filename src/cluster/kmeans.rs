//! Deterministic 2-means over axial orientation features.
use crate::error::{FenceError, Result};
use nalgebra::Vector2;

pub(super) struct TwoMeans {
    /// Cluster index (0 or 1) per feature.
    pub labels: Vec<usize>,
    pub centroids: [Vector2<f32>; 2],
    pub iterations: usize,
}

/// Indices of the two most distant features, lowest pair first on ties.
fn farthest_pair(features: &[Vector2<f32>]) -> (usize, usize, f32) {
    let mut best = (0, 1, f32::NEG_INFINITY);
    for i in 0..features.len() {
        for j in (i + 1)..features.len() {
            let d = (features[i] - features[j]).norm_squared();
            if d > best.2 {
                best = (i, j, d);
            }
        }
    }
    (best.0, best.1, best.2.max(0.0).sqrt())
}

#[inline]
fn nearest(f: &Vector2<f32>, centroids: &[Vector2<f32>; 2]) -> usize {
    // ties go to cluster 0
    if (f - centroids[1]).norm_squared() < (f - centroids[0]).norm_squared() {
        1
    } else {
        0
    }
}

fn update_centroids(features: &[Vector2<f32>], labels: &[usize]) -> Result<[Vector2<f32>; 2]> {
    let mut sums = [Vector2::zeros(); 2];
    let mut counts = [0usize; 2];
    for (f, &l) in features.iter().zip(labels) {
        sums[l] += f;
        counts[l] += 1;
    }
    if counts.contains(&0) {
        return Err(FenceError::ClusteringDegenerate {
            reason: "a cluster became empty",
        });
    }
    Ok([
        sums[0] / counts[0] as f32,
        sums[1] / counts[1] as f32,
    ])
}

/// Lloyd iterations seeded with the farthest pair of features. Stops when no
/// label changes or after `max_iterations` assignment passes.
pub(super) fn two_means(
    features: &[Vector2<f32>],
    max_iterations: usize,
    degenerate_eps: f32,
) -> Result<TwoMeans> {
    let (a, b, spread) = farthest_pair(features);
    if features.len() < 2 || spread < degenerate_eps {
        return Err(FenceError::ClusteringDegenerate {
            reason: "all orientations coincide",
        });
    }

    let mut centroids = [features[a], features[b]];
    let mut labels = vec![usize::MAX; features.len()];
    let mut iterations = 0;
    while iterations < max_iterations {
        iterations += 1;
        let mut changed = false;
        for (f, label) in features.iter().zip(labels.iter_mut()) {
            let l = nearest(f, &centroids);
            if *label != l {
                *label = l;
                changed = true;
            }
        }
        centroids = update_centroids(features, &labels)?;
        if !changed {
            break;
        }
    }
    Ok(TwoMeans {
        labels,
        centroids,
        iterations,
    })
}
