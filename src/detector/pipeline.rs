//! Detector pipeline driving fence detection end-to-end.
//!
//! Typical usage:
//! ```no_run
//! use fence_detector::{DetectorParams, FenceDetector, LaserScanMsg};
//!
//! # fn example(msg: LaserScanMsg) {
//! let detector = FenceDetector::new(DetectorParams::default());
//! match detector.process(&msg) {
//!     Ok(pose) => println!("corner at ({:.3}, {:.3})", pose.x, pose.y),
//!     Err(err) => eprintln!("no fence: {err}"),
//! }
//! # }
//! ```
use super::params::DetectorParams;
use crate::cluster::{cluster_orientations, OrientationClusters};
use crate::diagnostics::{
    ms_since, ClusterStage, DetectionReport, HoughStage, InputDescriptor, PipelineTrace,
    RasterStage, TimingBreakdown,
};
use crate::error::Result;
use crate::image::OccupancyGrid;
use crate::intersection::pose_from_clusters;
use crate::raster::rasterize;
use crate::scan::{LaserScanMsg, ScanFrame};
use crate::segments::{extract_lines, LineExtraction};
use crate::types::FencePose;
use log::debug;
use std::time::Instant;

/// Fence corner detector over single laser scans.
#[derive(Clone, Debug, Default)]
pub struct FenceDetector {
    params: DetectorParams,
}

/// Products of the scan → grid → segments stages of one call.
struct FrontEnd {
    frame: ScanFrame,
    grid: OccupancyGrid,
    extraction: LineExtraction,
    timings: TimingBreakdown,
}

/// Products of the clustering and intersection stages of one call.
struct BackEnd {
    clusters: OrientationClusters,
    pose: FencePose,
}

impl FenceDetector {
    /// Create a detector with the supplied parameters.
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Estimate the fence corner seen in `msg`.
    pub fn process(&self, msg: &LaserScanMsg) -> Result<FencePose> {
        let mut front = self.run_front_end(msg)?;
        let back = self.run_back_end(&mut front)?;
        debug!(
            "FenceDetector::process pose=({:.3}, {:.3}) segments={}",
            back.pose.x,
            back.pose.y,
            front.extraction.len()
        );
        Ok(back.pose)
    }

    /// Rasterize `msg` and extract its line segments without clustering.
    pub fn extract_lines(&self, msg: &LaserScanMsg) -> Result<LineExtraction> {
        self.run_front_end(msg).map(|front| front.extraction)
    }

    /// Same as [`process`](Self::process), also returning a trace of every
    /// stage.
    pub fn process_with_diagnostics(&self, msg: &LaserScanMsg) -> Result<DetectionReport> {
        let total_start = Instant::now();
        let mut front = self.run_front_end(msg)?;
        let back = self.run_back_end(&mut front)?;
        front.timings.total_ms = ms_since(total_start);

        let FrontEnd {
            frame,
            grid,
            extraction,
            timings,
        } = front;
        let trace = PipelineTrace {
            input: InputDescriptor::from_frame(&frame),
            raster: RasterStage::from_grid(&grid, timings.stage_ms("raster").unwrap_or(0.0)),
            hough: HoughStage::from_extraction(&extraction),
            clusters: ClusterStage::new(
                &back.clusters,
                &extraction.segments,
                timings.stage_ms("cluster").unwrap_or(0.0),
            ),
            timings,
        };
        debug!(
            "FenceDetector::process_with_diagnostics pose=({:.3}, {:.3}) total_ms={:.3}",
            back.pose.x, back.pose.y, trace.timings.total_ms
        );
        Ok(DetectionReport {
            pose: back.pose,
            trace,
        })
    }

    fn run_front_end(&self, msg: &LaserScanMsg) -> Result<FrontEnd> {
        self.params.validate()?;
        let mut timings = TimingBreakdown::default();

        let start = Instant::now();
        let frame = ScanFrame::from_message(msg)?;
        timings.push("scan", ms_since(start));

        let start = Instant::now();
        let grid = rasterize(&frame, self.params.resolution)?;
        timings.push("raster", ms_since(start));

        let extraction = extract_lines(&grid, &self.params.hough)?;
        timings.push("hough", extraction.elapsed_ms);
        debug!(
            "FenceDetector: beams={} grid={}x{} segments={}",
            frame.len(),
            grid.w,
            grid.h,
            extraction.len()
        );
        Ok(FrontEnd {
            frame,
            grid,
            extraction,
            timings,
        })
    }

    fn run_back_end(&self, front: &mut FrontEnd) -> Result<BackEnd> {
        let segments = &front.extraction.segments;

        let start = Instant::now();
        let clusters = cluster_orientations(segments, &self.params.cluster)?;
        front.timings.push("cluster", ms_since(start));

        let start = Instant::now();
        let pose = pose_from_clusters(segments, &clusters, self.params.parallel_eps)?;
        front.timings.push("intersection", ms_since(start));
        Ok(BackEnd { clusters, pose })
    }
}
