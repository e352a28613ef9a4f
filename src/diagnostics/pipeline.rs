use super::stages::{ClusterStage, HoughStage, InputDescriptor, RasterStage};
use super::timing::TimingBreakdown;
use crate::types::FencePose;
use serde::Serialize;

/// Result produced by [`FenceDetector::process_with_diagnostics`](crate::FenceDetector).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub pose: FencePose,
    pub trace: PipelineTrace,
}

/// Stage-by-stage record of one detector run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub raster: RasterStage,
    pub hough: HoughStage,
    pub clusters: ClusterStage,
}
