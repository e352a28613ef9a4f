//! Progressive probabilistic Hough transform over a binary grid.
//!
//! Occupied cells are visited in a seeded pseudo-random order. Each visited
//! cell casts one vote per accumulator angle; as soon as its strongest
//! `(rho, theta)` bin reaches the threshold, the corresponding line is walked
//! from the cell in both directions with 16.16 fixed-point stepping until the
//! grid border or a run of more than `max_line_gap` free cells.
//!
//! With a coarse distance resolution the bins of several nearby angles often
//! reach the threshold together. Every angle whose bin qualifies is walked and
//! the longest walk is kept, so a line is followed along its true direction
//! instead of drifting off after a few dozen cells. Cells met on
//! the walk are consumed so they never seed or join another line, and when the
//! walked span is long enough the votes they already cast are retracted.
use super::options::HoughOptions;
use super::segment::GridSegment;
use crate::image::OccupancyGrid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SHIFT: u32 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellState {
    /// Empty or already consumed by a walked line.
    Free,
    /// Occupied, not yet visited.
    Pending,
    /// Occupied and counted in the accumulator.
    Voted,
}

/// Fixed-point line walker. The major axis advances by one cell per step and
/// the minor axis by a 16.16 fraction.
struct LineWalk {
    x0: i64,
    y0: i64,
    dx0: i64,
    dy0: i64,
    x_major: bool,
}

impl LineWalk {
    fn new(x: usize, y: usize, normal: [f32; 2]) -> Self {
        let a = -normal[1];
        let b = normal[0];
        let (x, y) = (x as i64, y as i64);
        let one = (1i64 << SHIFT) as f32;
        let half = 1i64 << (SHIFT - 1);
        if a.abs() > b.abs() {
            Self {
                x0: x,
                y0: (y << SHIFT) + half,
                dx0: if a > 0.0 { 1 } else { -1 },
                dy0: (b * one / a.abs()).round() as i64,
                x_major: true,
            }
        } else {
            Self {
                x0: (x << SHIFT) + half,
                y0: y,
                dx0: (a * one / b.abs()).round() as i64,
                dy0: if b > 0.0 { 1 } else { -1 },
                x_major: false,
            }
        }
    }

    /// Cells visited when stepping forward (`sign = 1`) or backward (`-1`),
    /// starting with the seed cell.
    fn cells(&self, sign: i64) -> impl Iterator<Item = (i64, i64)> + '_ {
        let (dx, dy) = (self.dx0 * sign, self.dy0 * sign);
        (0i64..).map(move |k| {
            let x = self.x0 + k * dx;
            let y = self.y0 + k * dy;
            if self.x_major {
                (x, y >> SHIFT)
            } else {
                (x >> SHIFT, y)
            }
        })
    }
}

/// Larger of the x and y spans between two walk ends.
#[inline]
fn extent(ends: &[(i64, i64); 2]) -> i64 {
    (ends[1].0 - ends[0].0)
        .abs()
        .max((ends[1].1 - ends[0].1).abs())
}

pub(super) struct ProbabilisticHough<'a> {
    grid: &'a OccupancyGrid,
    options: HoughOptions,
    num_angle: usize,
    num_rho: usize,
    /// Per angle: (cos, sin) scaled by the inverse distance resolution.
    trig: Vec<[f32; 2]>,
    accum: Vec<i32>,
    state: Vec<CellState>,
}

impl<'a> ProbabilisticHough<'a> {
    pub(super) fn new(grid: &'a OccupancyGrid, options: HoughOptions) -> Self {
        let irho = 1.0 / options.pixel_resolution;
        let num_angle = ((std::f32::consts::PI / options.theta_resolution).round() as usize).max(1);
        let num_rho = ((((grid.w + grid.h) * 2 + 1) as f32 / options.pixel_resolution).round()
            as usize)
            .max(1);
        let trig = (0..num_angle)
            .map(|n| {
                let theta = n as f32 * options.theta_resolution;
                [theta.cos() * irho, theta.sin() * irho]
            })
            .collect();
        let state = grid
            .data
            .iter()
            .map(|&v| {
                if v != 0 {
                    CellState::Pending
                } else {
                    CellState::Free
                }
            })
            .collect();
        Self {
            grid,
            options,
            num_angle,
            num_rho,
            trig,
            accum: vec![0; num_angle * num_rho],
            state,
        }
    }

    pub(super) fn accumulator_shape(&self) -> (usize, usize) {
        (self.num_angle, self.num_rho)
    }

    pub(super) fn run(mut self) -> Vec<GridSegment> {
        let mut rng = StdRng::seed_from_u64(self.options.seed);
        let mut pending: Vec<(usize, usize)> = self.grid.occupied_cells().collect();
        let threshold = self.options.accumulator_threshold as i32;
        let min_len = self.options.min_line_length as i64;
        let mut segments = Vec::new();

        while !pending.is_empty() {
            let pick = rng.gen_range(0..pending.len());
            let (x, y) = pending.swap_remove(pick);
            if self.state[self.grid.idx(x, y)] != CellState::Pending {
                continue;
            }

            let (best_n, best_votes) = self.vote(x, y);
            if best_votes < threshold {
                continue;
            }

            let (walk, ends) = self.best_walk(x, y, best_n, threshold);
            let good = extent(&ends) >= min_len;

            self.consume(&walk, 1, ends[0], good);
            self.consume(&walk, -1, ends[1], good);

            if good {
                segments.push(GridSegment::new(
                    [ends[0].0 as i32, ends[0].1 as i32],
                    [ends[1].0 as i32, ends[1].1 as i32],
                ));
                if self
                    .options
                    .max_lines
                    .is_some_and(|max| segments.len() >= max)
                {
                    break;
                }
            }
        }
        segments
    }

    #[inline]
    fn rho_index(&self, n: usize, x: usize, y: usize) -> usize {
        let [c, s] = self.trig[n];
        let r = (x as f32 * c + y as f32 * s).round() as i64 + (self.num_rho as i64 - 1) / 2;
        r.clamp(0, self.num_rho as i64 - 1) as usize
    }

    #[inline]
    fn votes(&self, n: usize, x: usize, y: usize) -> i32 {
        self.accum[n * self.num_rho + self.rho_index(n, x, y)]
    }

    /// Cast the votes of `(x, y)`; returns the strongest angle and its count.
    fn vote(&mut self, x: usize, y: usize) -> (usize, i32) {
        let idx = self.grid.idx(x, y);
        self.state[idx] = CellState::Voted;
        let mut best = (0usize, i32::MIN);
        for n in 0..self.num_angle {
            let r = self.rho_index(n, x, y);
            let slot = &mut self.accum[n * self.num_rho + r];
            *slot += 1;
            if *slot > best.1 {
                best = (n, *slot);
            }
        }
        best
    }

    /// Angles other than `best` whose bin for `(x, y)` has also reached
    /// `threshold`, ordered by circular distance from `best`.
    fn qualifying_angles(&self, best: usize, x: usize, y: usize, threshold: i32) -> Vec<usize> {
        let m = self.num_angle;
        let mut out: Vec<usize> = (0..m)
            .filter(|&n| n != best && self.votes(n, x, y) >= threshold)
            .collect();
        out.sort_by_key(|&n| {
            let d = n.abs_diff(best);
            d.min(m - d)
        });
        out
    }

    /// Walk from `(x, y)` along the strongest angle and every other qualifying
    /// angle; keeps the walk with the largest axis extent (earlier candidates
    /// win ties).
    fn best_walk(
        &self,
        x: usize,
        y: usize,
        best_n: usize,
        threshold: i32,
    ) -> (LineWalk, [(i64, i64); 2]) {
        let seed = (x as i64, y as i64);
        let walk_along = |n: usize| {
            let walk = LineWalk::new(x, y, self.trig[n]);
            let ends = [
                self.walk_extent(&walk, 1, seed),
                self.walk_extent(&walk, -1, seed),
            ];
            (walk, ends)
        };
        let mut chosen = walk_along(best_n);
        let mut chosen_extent = extent(&chosen.1);
        for n in self.qualifying_angles(best_n, x, y, threshold) {
            let candidate = walk_along(n);
            let e = extent(&candidate.1);
            if e > chosen_extent {
                chosen = candidate;
                chosen_extent = e;
            }
        }
        chosen
    }

    fn retract(&mut self, x: usize, y: usize) {
        for n in 0..self.num_angle {
            let r = self.rho_index(n, x, y);
            self.accum[n * self.num_rho + r] -= 1;
        }
    }

    #[inline]
    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.grid.w && (y as usize) < self.grid.h
    }

    /// Last occupied cell reached before the border or an oversized gap.
    fn walk_extent(&self, walk: &LineWalk, sign: i64, seed: (i64, i64)) -> (i64, i64) {
        let mut end = seed;
        let mut gap = 0u32;
        for (x, y) in walk.cells(sign) {
            if !self.in_bounds(x, y) {
                break;
            }
            if self.state[self.grid.idx(x as usize, y as usize)] != CellState::Free {
                gap = 0;
                end = (x, y);
            } else {
                gap += 1;
                if gap > self.options.max_line_gap {
                    break;
                }
            }
        }
        end
    }

    /// Consume every occupied cell between the seed and `end`, retracting the
    /// votes of visited cells when the segment is kept.
    fn consume(&mut self, walk: &LineWalk, sign: i64, end: (i64, i64), retract: bool) {
        for (x, y) in walk.cells(sign) {
            if !self.in_bounds(x, y) {
                break;
            }
            let (ux, uy) = (x as usize, y as usize);
            let idx = self.grid.idx(ux, uy);
            match self.state[idx] {
                CellState::Voted => {
                    if retract {
                        self.retract(ux, uy);
                    }
                    self.state[idx] = CellState::Free;
                }
                CellState::Pending => self.state[idx] = CellState::Free,
                CellState::Free => {}
            }
            if (x, y) == end {
                break;
            }
        }
    }
}
