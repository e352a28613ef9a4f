//! I/O helpers for scans, occupancy grids and JSON.
//!
//! - `load_scan_json`: read a [`LaserScanMsg`] recorded as JSON.
//! - `save_occupancy_grid`: write an [`OccupancyGrid`] to a grayscale PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageView, OccupancyGrid};
use crate::scan::LaserScanMsg;
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load a recorded scan message from a JSON file.
pub fn load_scan_json(path: &Path) -> Result<LaserScanMsg, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read scan {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse scan {}: {e}", path.display()))
}

/// Save an occupancy grid as an 8-bit PNG (occupied = white).
///
/// Row 0 holds the smallest y, so the image is flipped vertically to put +y
/// up when viewed.
pub fn save_occupancy_grid(grid: &OccupancyGrid, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(grid.width() as u32, grid.height() as u32);
    for (y, row) in grid.rows().enumerate() {
        let flipped = (grid.height() - 1 - y) as u32;
        for (x, &px) in row.iter().enumerate() {
            out.put_pixel(x as u32, flipped, Luma([px]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
