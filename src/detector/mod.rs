//! Fence detector driving the scan → pose pipeline.
//!
//! Overview
//! - Validates the scan message and derives polar/Cartesian samples.
//! - Rasterizes the finite points into an occupancy grid.
//! - Extracts line segments with a probabilistic Hough transform and maps
//!   them back to metric coordinates.
//! - Splits the segments into two orientation families and keeps, per family,
//!   the segment whose line passes closest to the sensor.
//! - Intersects the two representatives to obtain the fence corner.
//!
//! Modules
//! - [`params`] – configuration consumed by [`FenceDetector`].
//! - `pipeline` – the [`FenceDetector`] implementation.
//!
//! Every call works on its own stage products; the detector itself only holds
//! the read-only parameters, so one instance can serve several threads.

pub mod params;
mod pipeline;

pub use params::DetectorParams;
pub use pipeline::FenceDetector;
