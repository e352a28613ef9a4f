//! Angle utilities for orientation clustering and its diagnostics.

/// Normalizes an angle into the range [0, π).
#[inline]
pub fn normalize_half_pi(angle: f32) -> f32 {
    let mut norm = angle.rem_euclid(std::f32::consts::PI);
    if norm >= std::f32::consts::PI {
        norm -= std::f32::consts::PI;
    }
    if norm >= std::f32::consts::PI - 1e-6 {
        0.0
    } else {
        norm
    }
}

/// Computes the smallest unsigned angular difference between two angles,
/// treating antipodal directions as equivalent (i.e. π apart → 0).
#[inline]
pub fn angular_difference(a: f32, b: f32) -> f32 {
    let mut diff = (a - b).abs();
    if diff > std::f32::consts::PI {
        diff = diff.rem_euclid(std::f32::consts::PI);
    }
    if diff > std::f32::consts::FRAC_PI_2 {
        std::f32::consts::PI - diff
    } else {
        diff
    }
}

/// Maps an undirected orientation onto the unit circle by doubling its angle.
///
/// `φ` and `φ + π` land on the same point while perpendicular orientations end
/// up diametrically opposite, which makes Euclidean distance a proper
/// orientation metric.
#[inline]
pub fn axial_embedding(angle: f32) -> [f32; 2] {
    let doubled = 2.0 * angle;
    [doubled.cos(), doubled.sin()]
}

/// Inverse of [`axial_embedding`]: recovers an orientation in [0, π) from a
/// (not necessarily unit) doubled-angle vector.
#[inline]
pub fn axial_angle(v: [f32; 2]) -> f32 {
    normalize_half_pi(0.5 * v[1].atan2(v[0]))
}
