use fence_detector::LaserScanMsg;

/// Two perpendicular walls seen from a sensor at the origin: a front wall on
/// the line `x = front_x` and a side wall on the line `y = side_y`.
#[derive(Clone, Copy, Debug)]
pub struct CornerScene {
    pub front_x: f64,
    /// Extent of the front wall along y.
    pub front_span: (f64, f64),
    pub side_y: f64,
    /// Extent of the side wall along x.
    pub side_span: (f64, f64),
}

impl CornerScene {
    pub fn corner(&self) -> [f32; 2] {
        [self.front_x as f32, self.side_y as f32]
    }

    /// Distance along the beam at `theta` to the nearest wall, `inf` when the
    /// beam misses both.
    pub fn cast(&self, theta: f64) -> f64 {
        let (s, c) = theta.sin_cos();
        let mut best = f64::INFINITY;
        if c > 1e-9 {
            let t = self.front_x / c;
            let y = t * s;
            if t > 0.0 && y >= self.front_span.0 && y <= self.front_span.1 {
                best = best.min(t);
            }
        }
        if s.abs() > 1e-9 {
            let t = self.side_y / s;
            let x = t * c;
            if t > 0.0 && x >= self.side_span.0 && x <= self.side_span.1 {
                best = best.min(t);
            }
        }
        best
    }
}

/// Front wall at x = 2 from y = -1 to 1, side wall at y = 1 from x = 0.5 to 2.
pub fn left_corner() -> CornerScene {
    CornerScene {
        front_x: 2.0,
        front_span: (-1.0, 1.0),
        side_y: 1.0,
        side_span: (0.5, 2.0),
    }
}

/// Front wall at x = 1.8 from y = -1.2 to 0.8, side wall at y = -1.2 from
/// x = 0.6 to 1.8.
pub fn right_corner() -> CornerScene {
    CornerScene {
        front_x: 1.8,
        front_span: (-1.2, 0.8),
        side_y: -1.2,
        side_span: (0.6, 1.8),
    }
}

/// Ray-cast `scene` over `[min_deg, max_deg]` in `step_deg` increments.
///
/// Beams that miss both walls report `inf`; `noise` overrides individual
/// beams with spurious returns.
pub fn corner_scan(
    scene: &CornerScene,
    min_deg: f32,
    max_deg: f32,
    step_deg: f32,
    noise: &[(usize, f32)],
) -> LaserScanMsg {
    let angle_min = min_deg.to_radians();
    let angle_max = max_deg.to_radians();
    let angle_increment = step_deg.to_radians();
    let beams = ((max_deg - min_deg) / step_deg).round() as usize + 1;
    let mut ranges: Vec<f32> = (0..beams)
        .map(|i| {
            let theta = angle_min as f64 + i as f64 * angle_increment as f64;
            scene.cast(theta) as f32
        })
        .collect();
    for &(i, r) in noise {
        ranges[i] = r;
    }
    LaserScanMsg {
        angle_min,
        angle_max,
        angle_increment,
        range_min: 0.05,
        range_max: 30.0,
        ranges,
        stamp: 1_700_000_000.25,
        frame_id: "laser".into(),
    }
}

/// Sparse spurious returns for the beams of [`left_corner_scan`].
pub const LEFT_NOISE: [(usize, f32); 6] = [
    (20, 1.3),
    (45, 0.9),
    (130, 1.1),
    (300, 1.7),
    (520, 0.8),
    (540, 1.4),
];

/// [`left_corner`] seen from -60° to 80° at 0.25° with sparse noise.
pub fn left_corner_scan() -> LaserScanMsg {
    corner_scan(&left_corner(), -60.0, 80.0, 0.25, &LEFT_NOISE)
}

/// [`right_corner`] seen from -80° to 60° at 0.25° with sparse noise.
pub fn right_corner_scan() -> LaserScanMsg {
    corner_scan(
        &right_corner(),
        -80.0,
        60.0,
        0.25,
        &[(10, 1.0), (40, 1.6), (200, 1.2), (400, 0.9), (500, 1.5)],
    )
}

/// Scan with returns scattered at random-looking ranges and no structure.
pub fn clutter_scan() -> LaserScanMsg {
    let ranges: Vec<f32> = (0..181)
        .map(|i| if i % 9 == 0 { 0.8 + (i % 7) as f32 * 0.3 } else { f32::INFINITY })
        .collect();
    LaserScanMsg {
        angle_min: (-90.0f32).to_radians(),
        angle_max: 90.0f32.to_radians(),
        angle_increment: 1.0f32.to_radians(),
        range_min: 0.05,
        range_max: 30.0,
        ranges,
        stamp: 0.0,
        frame_id: "laser".into(),
    }
}
