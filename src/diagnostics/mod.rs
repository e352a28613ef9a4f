//! Diagnostics data model returned by the detector.
//!
//! [`DetectionReport`] pairs the estimated [`FencePose`](crate::FencePose)
//! with a [`PipelineTrace`] holding the input summary, one record per stage
//! (raster, Hough, clustering) and the per-stage timings. Everything here is
//! plain `Serialize` data meant to be dumped as JSON by tools.

pub mod pipeline;
pub mod stages;
pub mod timing;

pub use pipeline::{DetectionReport, PipelineTrace};
pub use stages::{ClusterStage, HoughStage, InputDescriptor, RasterStage};
pub use timing::{ms_since, StageTiming, TimingBreakdown};
