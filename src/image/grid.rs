//! Binary occupancy raster built from the Cartesian points of one scan.
//!
//! Row-major 8-bit buffer (stride == width) where occupied cells hold
//! [`OccupancyGrid::OCCUPIED`] and free cells hold 0. Columns follow the
//! sensor x axis and rows the y axis; cell `(col, row)` covers the metric
//! point `(col * resolution + min_x, row * resolution + min_y)`.
use serde::Serialize;

/// Metric position of grid cell `(0, 0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOrigin {
    pub min_x: f32,
    pub min_y: f32,
}

#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    /// Number of cells along x
    pub w: usize,
    /// Number of cells along y
    pub h: usize,
    /// Number of cells between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<u8>,
    pub origin: GridOrigin,
    /// Metric edge length of a cell
    pub resolution: f32,
}

impl OccupancyGrid {
    pub const OCCUPIED: u8 = 255;

    /// Construct an empty grid of size `w × h`.
    pub fn new(w: usize, h: usize, origin: GridOrigin, resolution: f32) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0; w * h],
            origin,
            resolution,
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }

    #[inline]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.data[self.idx(x, y)] != 0
    }

    /// Mark a cell as occupied. Marking twice is a no-op.
    #[inline]
    pub fn mark(&mut self, x: usize, y: usize) {
        let i = self.idx(x, y);
        self.data[i] = Self::OCCUPIED;
    }

    pub fn occupied_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Occupied cells as `(x, y)` in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.w;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0)
            .map(move |(i, _)| (i % w, i / w))
    }

    /// Metric sensor-frame position of grid coordinate `(px, py)`.
    #[inline]
    pub fn cell_to_metric(&self, px: f32, py: f32) -> [f32; 2] {
        [
            px * self.resolution + self.origin.min_x,
            py * self.resolution + self.origin.min_y,
        ]
    }
}

impl crate::image::traits::ImageView for OccupancyGrid {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
