//! Normalized representation of one planar range scan.
//!
//! A [`LaserScanMsg`] is the strict input schema handed over by whatever feeds
//! the detector (sensor driver, log replay, JSON file). It is validated eagerly
//! and turned into an immutable [`ScanFrame`] holding, per beam, the polar
//! coordinates `(theta, rho)`, the derived Cartesian point `(x, y)` and the
//! range variance of the sensor noise model.
//!
//! Beam angles are generated from `angle_min` in steps of `angle_increment`
//! with an exclusive upper bound `angle_max`. Drivers disagree on whether the
//! last beam sits exactly on `angle_max`, so when the exclusive sequence is one
//! short the generation is repeated with an inclusive bound. Any remaining
//! disagreement is a [`FenceError::DimensionMismatch`](crate::FenceError).
//!
//! Sub-scans are taken with [`ScanFrame::partition_by_index`] and
//! [`ScanFrame::partition_by_angle`]; both bounds are inclusive.

mod frame;
mod message;
mod partition;

pub use frame::{range_variance, ScanBounds, ScanFrame, ScanSample, RANGE_NOISE_SIGMA};
pub use message::LaserScanMsg;
